use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 属性值：布尔属性（如 async）或字符串属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Str(String),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            AttrValue::Bool(_) => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

/// 有序属性表：保持插入顺序，重复设置时原位替换
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// 字符串属性值（布尔属性返回None）
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k == name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let idx = self.0.iter().position(|(k, _)| k == name)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// 手动实现反序列化，按输入顺序保存属性
impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of attribute name to string or boolean")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut attrs = Attributes::new();
                while let Some((k, v)) = access.next_entry::<String, AttrValue>()? {
                    attrs.set(k, v);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// 宿主生成的标签描述（结构化数据，非HTML字符串）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDescriptor {
    pub tag_name: String,
    #[serde(default)]
    pub attributes: Attributes,
    /// 内联内容；Some 即为带内容的标签
    #[serde(rename = "innerHTML", default, skip_serializing_if = "Option::is_none")]
    pub inner_html: Option<String>,
    #[serde(default = "default_close_tag")]
    pub close_tag: bool,
}

fn default_close_tag() -> bool {
    true
}

impl TagDescriptor {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Attributes::new(),
            inner_html: None,
            close_tag: true,
        }
    }

    /// `<script src=...>` 标签
    pub fn script(src: impl Into<String>) -> Self {
        let mut tag = Self::new("script");
        tag.attributes.set("src", src.into());
        tag
    }

    /// 内联 `<script>...</script>` 标签
    pub fn inline_script(source: impl Into<String>) -> Self {
        let mut tag = Self::new("script");
        tag.inner_html = Some(source.into());
        tag
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.set(name, value);
        self
    }

    #[inline]
    pub fn is_script(&self) -> bool {
        self.tag_name == "script"
    }

    /// src 引用（原始值，含 publicPath 前缀）
    pub fn src(&self) -> Option<&str> {
        self.attributes.get_str("src")
    }

    /// 是否为内联体标签：有 inner_html（可为空串）且无 src
    pub fn has_inline_body(&self) -> bool {
        self.inner_html.is_some() && self.src().is_none()
    }
}
