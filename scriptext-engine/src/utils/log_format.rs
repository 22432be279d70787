use std::fmt::{self, Write};

use crate::core::{AttrValue, TagDescriptor};

/// 内联脚本预览的最大长度
pub const INLINE_PREVIEW_LEN: usize = 60;

/// 内联脚本体的单行预览：按空白切词后以单个空格连接，超出字符预算时以省略号结尾
pub fn inline_preview(source: &str, budget: usize) -> InlinePreview<'_> {
    InlinePreview { source, budget }
}

pub struct InlinePreview<'a> {
    source: &'a str,
    budget: usize,
}

impl fmt::Display for InlinePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut left = self.budget;
        for (i, word) in self.source.split_whitespace().enumerate() {
            if i > 0 {
                if left == 0 {
                    return f.write_char('…');
                }
                f.write_char(' ')?;
                left -= 1;
            }
            match word.char_indices().nth(left) {
                Some((cut, _)) => {
                    f.write_str(&word[..cut])?;
                    return f.write_char('…');
                }
                None => {
                    f.write_str(word)?;
                    left -= word.chars().count();
                }
            }
        }
        Ok(())
    }
}

// ======================== 衍生：标签日志格式化 ========================
/// 标签单行描述，格式：<script src="a.js" async>{预览}
/// 仅用于调试日志，不是HTML序列化
#[inline]
pub fn describe_tag(tag: &TagDescriptor) -> impl fmt::Display + '_ {
    struct TagView<'a>(&'a TagDescriptor);

    impl fmt::Display for TagView<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let tag = self.0;
            write!(f, "<{}", tag.tag_name)?;
            for (name, value) in tag.attributes.iter() {
                match value {
                    AttrValue::Bool(true) => write!(f, " {}", name)?,
                    AttrValue::Bool(false) => {}
                    AttrValue::Str(s) => write!(f, " {}=\"{}\"", name, s)?,
                }
            }
            f.write_char('>')?;
            if let Some(body) = tag.inner_html.as_deref() {
                write!(f, "{{{}}}", inline_preview(body, INLINE_PREVIEW_LEN))?;
            }
            Ok(())
        }
    }

    TagView(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_preview_collapses_whitespace() {
        let out = inline_preview("  a  \n\t b\n", 10).to_string();
        assert_eq!(out, "a b");
    }

    #[test]
    fn test_inline_preview_truncates() {
        assert_eq!(inline_preview("abcdefgh", 3).to_string(), "abc…");
        assert_eq!(inline_preview("ab cd", 2).to_string(), "ab…");
        assert_eq!(inline_preview("ab cd", 5).to_string(), "ab cd");
    }

    #[test]
    fn test_describe_tag() {
        let tag = TagDescriptor::script("a.js").with_attr("async", true);
        assert_eq!(describe_tag(&tag).to_string(), r#"<script src="a.js" async>"#);

        let inline = TagDescriptor::inline_script("console.log(1)\n\n");
        assert_eq!(describe_tag(&inline).to_string(), "<script>{console.log(1)}");
    }
}
