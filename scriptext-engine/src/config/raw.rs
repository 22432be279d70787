//! 用户原始配置（弱类型）
//! 支持从 Rust 值 或 serde_json::Value 构建

use regex::Regex;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// 弱类型配置值
#[derive(Debug, Clone)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Regex(Regex),
    Array(Vec<RawValue>),
    /// 保持声明顺序的键值对
    Object(Vec<(String, RawValue)>),
}

/// 顶层原始配置
pub type RawOptions = RawValue;

impl RawValue {
    /// 空对象
    pub fn object() -> Self {
        RawValue::Object(Vec::new())
    }

    /// 对象字段读取；非对象或不存在时返回None
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        match self {
            RawValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// 写入对象字段（后写覆盖），非对象值先转为空对象
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        if !matches!(self, RawValue::Object(_)) {
            *self = RawValue::object();
        }
        let key = key.into();
        let value = value.into();
        if let RawValue::Object(entries) = self {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    /// 链式写入
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// 类型名（用于错误提示）
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "boolean",
            RawValue::Number(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Regex(_) => "regex",
            RawValue::Array(_) => "array",
            RawValue::Object(_) => "object",
        }
    }

    /// 从 JSON 值构建
    /// `{"regex": "...", "flags": "i"}` 形式的对象视为正则模式
    pub fn from_json(value: &Value) -> CoreResult<Self> {
        Ok(match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => RawValue::Number(n.as_f64().unwrap_or_default()),
            Value::String(s) => RawValue::String(s.clone()),
            Value::Array(items) => RawValue::Array(
                items.iter().map(RawValue::from_json).collect::<CoreResult<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                if let Some(source) = json_regex_source(map) {
                    let flags = map.get("flags").and_then(Value::as_str).unwrap_or("");
                    return compile_regex(source, flags).map(RawValue::Regex);
                }
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    entries.push((k.clone(), RawValue::from_json(v)?));
                }
                RawValue::Object(entries)
            }
        })
    }

    /// 从 JSON 文本构建
    pub fn from_json_str(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::config(format!("options are not valid JSON: {}", e)))?;
        Self::from_json(&value)
    }
}

/// 仅含 regex（及可选 flags）的对象才是正则模式，带 test 的对象是规则
fn json_regex_source(map: &serde_json::Map<String, Value>) -> Option<&str> {
    if map.contains_key("test") {
        return None;
    }
    map.get("regex").and_then(Value::as_str)
}

/// 按 JS 风格 flags 编译正则
/// flags 折叠为源码前缀的内联标志组（如 `(?i)^a`），使 as_str() 携带完整语义
fn compile_regex(source: &str, flags: &str) -> CoreResult<Regex> {
    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !inline.contains(flag) {
                    inline.push(flag);
                }
            }
            // g/y 对单次搜索无意义
            'g' | 'y' => {}
            other => {
                return Err(CoreError::config(format!(
                    "unsupported regex flag '{}' in /{}/",
                    other, source
                )))
            }
        }
    }
    if inline.is_empty() {
        return Ok(Regex::new(source)?);
    }
    Ok(Regex::new(&format!("(?{}){}", inline, source))?)
}

// ===================== Rust 值 → RawValue =====================

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<Regex> for RawValue {
    fn from(re: Regex) -> Self {
        RawValue::Regex(re)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        RawValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>, const N: usize> From<[T; N]> for RawValue {
    fn from(items: [T; N]) -> Self {
        RawValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Null, Into::into)
    }
}

// ===================== RawValue → JSON =====================

// 正则序列化为 {"regex": source}，flags 已折叠进 source，与 from_json 对称
impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Null => serializer.serialize_none(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Number(n) => serializer.serialize_f64(*n),
            RawValue::String(s) => serializer.serialize_str(s),
            RawValue::Regex(re) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("regex", re.as_str())?;
                map.end()
            }
            RawValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            RawValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
