//! 标签渲染工具
//! TagDescriptor → HTML 片段（仅输出，不做解析）

use std::borrow::Cow;
use std::fmt::Write;

use scriptext_engine::{AttrValue, TagDescriptor};

/// 标签渲染器
pub struct TagRenderer;

impl TagRenderer {
    /// 渲染单个标签
    /// true 渲染为无值属性，false 省略；内联内容原样输出
    pub fn render(tag: &TagDescriptor) -> String {
        let mut html = String::with_capacity(32 + tag.inner_html.as_ref().map_or(0, String::len));
        html.push('<');
        html.push_str(&tag.tag_name);

        for (name, value) in tag.attributes.iter() {
            match value {
                AttrValue::Bool(true) => {
                    html.push(' ');
                    html.push_str(name);
                }
                AttrValue::Bool(false) => {}
                AttrValue::Str(s) => {
                    let _ = write!(html, " {}=\"{}\"", name, escape_attribute(s));
                }
            }
        }
        html.push('>');

        if let Some(body) = &tag.inner_html {
            html.push_str(body);
        }
        if tag.close_tag {
            let _ = write!(html, "</{}>", tag.tag_name);
        }
        html
    }

    /// 按顺序渲染多个标签，每行一个
    pub fn render_all<'a>(tags: impl IntoIterator<Item = &'a TagDescriptor>) -> String {
        tags.into_iter()
            .map(Self::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 需要转义的属性值字符
const ESCAPE_CHARS: [char; 4] = ['&', '"', '<', '>'];

/// 属性值转义：无需转义时不分配
fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
