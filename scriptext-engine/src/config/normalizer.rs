//! 配置归一化：弱类型用户输入 → 完整的 Configuration
//! 各规则键独立转换，最终结果为 默认值 ∪ 已转换键

use log::debug;

use super::raw::{RawOptions, RawValue};
use crate::core::{
    AttrValue, AttributeRule, ChunkScope, Configuration, CustomAttributeRule, DefaultPosition,
    LoadingStrategy, Pattern, ResourceHintRule, RulePosition,
};
use crate::error::{CoreError, CoreResult};

/// 归一化入口
pub fn normalize(raw: &RawOptions) -> CoreResult<Configuration> {
    let entries = match raw {
        RawValue::Null => return Ok(Configuration::default()),
        RawValue::Object(entries) => entries,
        other => {
            return Err(CoreError::config(format!(
                "options must be an object, got {}",
                other.kind()
            )))
        }
    };

    let mut config = Configuration::default();
    for (key, value) in entries {
        match key.as_str() {
            "inline" => config.inline = attribute_rule(key, value)?,
            "sync" => config.sync = attribute_rule(key, value)?,
            "async" => config.async_ = attribute_rule(key, value)?,
            "defer" => config.defer = attribute_rule(key, value)?,
            "module" => config.module = attribute_rule(key, value)?,
            "preload" => config.preload = resource_hint_rule(key, value)?,
            "prefetch" => config.prefetch = resource_hint_rule(key, value)?,
            "custom" => config.custom = custom_rules(value)?,
            "defaultAttribute" => {
                if !value.is_null() {
                    config.default_attribute = expect_str(key, value)?.parse::<LoadingStrategy>()?;
                }
            }
            "defaultPosition" => {
                if !value.is_null() {
                    config.default_position = expect_str(key, value)?.parse::<DefaultPosition>()?;
                }
            }
            "removeInlinedAssets" => match value {
                RawValue::Null => {}
                RawValue::Bool(b) => config.remove_inlined_assets = *b,
                other => {
                    return Err(CoreError::config(format!(
                        "removeInlinedAssets must be a boolean, got {}",
                        other.kind()
                    )))
                }
            },
            unknown => debug!("忽略未识别的配置项 '{}'", unknown),
        }
    }

    Ok(config)
}

/// inline/sync/async/defer/module
fn attribute_rule(key: &str, value: &RawValue) -> CoreResult<AttributeRule> {
    let mut rule = AttributeRule::default();
    if is_absent(value) {
        return Ok(rule);
    }
    match value {
        RawValue::Object(_) => {
            rule.patterns = object_patterns(key, value)?;
            if let Some(position) = optional_str(key, value, "position")? {
                rule.position = position.parse::<RulePosition>()?;
            }
        }
        _ => rule.patterns = to_patterns(key, value)?,
    }
    Ok(rule)
}

/// preload/prefetch，chunks 默认 initial
fn resource_hint_rule(key: &str, value: &RawValue) -> CoreResult<ResourceHintRule> {
    let mut rule = ResourceHintRule::default();
    if is_absent(value) {
        return Ok(rule);
    }
    match value {
        RawValue::Object(_) => {
            rule.patterns = object_patterns(key, value)?;
            if let Some(chunks) = optional_str(key, value, "chunks")? {
                rule.chunk_scope = chunks.parse::<ChunkScope>()?;
            }
            if let Some(position) = optional_str(key, value, "position")? {
                rule.position = position.parse::<RulePosition>()?;
            }
        }
        _ => rule.patterns = to_patterns(key, value)?,
    }
    Ok(rule)
}

/// custom 接受单个对象或对象数组
fn custom_rules(value: &RawValue) -> CoreResult<Vec<CustomAttributeRule>> {
    match value {
        RawValue::Null => Ok(Vec::new()),
        RawValue::Object(_) => Ok(vec![custom_rule(value)?]),
        RawValue::Array(items) => items.iter().map(custom_rule).collect(),
        other => Err(CoreError::config(format!(
            "custom must be an object or an array of objects, got {}",
            other.kind()
        ))),
    }
}

fn custom_rule(value: &RawValue) -> CoreResult<CustomAttributeRule> {
    if !matches!(value, RawValue::Object(_)) {
        return Err(CoreError::config(format!(
            "custom entries must be objects, got {}",
            value.kind()
        )));
    }
    let patterns = object_patterns("custom", value)?;
    let attribute = optional_str("custom", value, "attribute")?
        .ok_or_else(|| CoreError::config("custom entry is missing 'attribute'"))?;
    let attr_value = match value.get("value") {
        None | Some(RawValue::Null) => AttrValue::Bool(true),
        Some(RawValue::Bool(b)) => AttrValue::Bool(*b),
        Some(RawValue::String(s)) => AttrValue::Str(s.clone()),
        Some(other) => {
            return Err(CoreError::config(format!(
                "custom value for '{}' must be a string or boolean, got {}",
                attribute,
                other.kind()
            )))
        }
    };
    Ok(CustomAttributeRule::new(patterns, attribute, attr_value))
}

/// 空值（null / 空字符串）视同未配置
fn is_absent(value: &RawValue) -> bool {
    match value {
        RawValue::Null => true,
        RawValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// 对象规则的 test 字段，缺失即配置错误
fn object_patterns(key: &str, value: &RawValue) -> CoreResult<Vec<Pattern>> {
    match value.get("test") {
        Some(test) if !test.is_null() => to_patterns(key, test),
        _ => Err(CoreError::config(format!("'{}' rule object is missing 'test'", key))),
    }
}

/// 字符串/正则 → 单元素列表；数组原样使用
fn to_patterns(key: &str, value: &RawValue) -> CoreResult<Vec<Pattern>> {
    match value {
        RawValue::String(s) => Ok(vec![Pattern::Literal(s.clone())]),
        RawValue::Regex(re) => Ok(vec![Pattern::Regex(re.clone())]),
        RawValue::Array(items) => items
            .iter()
            .map(|item| match item {
                RawValue::String(s) => Ok(Pattern::Literal(s.clone())),
                RawValue::Regex(re) => Ok(Pattern::Regex(re.clone())),
                other => Err(CoreError::config(format!(
                    "'{}' patterns must be strings or regexes, got {}",
                    key,
                    other.kind()
                ))),
            })
            .collect(),
        other => Err(CoreError::config(format!(
            "'{}' cannot be built from a {}",
            key,
            other.kind()
        ))),
    }
}

fn optional_str<'a>(key: &str, value: &'a RawValue, field: &str) -> CoreResult<Option<&'a str>> {
    match value.get(field) {
        None | Some(RawValue::Null) => Ok(None),
        Some(RawValue::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(CoreError::config(format!(
            "'{}.{}' must be a string, got {}",
            key,
            field,
            other.kind()
        ))),
    }
}

fn expect_str<'a>(key: &str, value: &'a RawValue) -> CoreResult<&'a str> {
    match value {
        RawValue::String(s) => Ok(s.as_str()),
        other => Err(CoreError::config(format!(
            "'{}' must be a string, got {}",
            key,
            other.kind()
        ))),
    }
}

// ===================== Configuration → RawValue =====================

impl Configuration {
    /// 还原为完整形状的原始配置，normalize(to_raw()) == self
    pub fn to_raw(&self) -> RawOptions {
        let mut raw = RawValue::object()
            .with("inline", attribute_rule_raw(&self.inline))
            .with("sync", attribute_rule_raw(&self.sync))
            .with("async", attribute_rule_raw(&self.async_))
            .with("defer", attribute_rule_raw(&self.defer))
            .with("module", attribute_rule_raw(&self.module))
            .with("preload", hint_rule_raw(&self.preload))
            .with("prefetch", hint_rule_raw(&self.prefetch));

        let custom: Vec<RawValue> = self
            .custom
            .iter()
            .map(|rule| {
                let value = match &rule.value {
                    AttrValue::Bool(b) => RawValue::Bool(*b),
                    AttrValue::Str(s) => RawValue::String(s.clone()),
                };
                RawValue::object()
                    .with("test", patterns_raw(&rule.patterns))
                    .with("attribute", rule.attribute.as_str())
                    .with("value", value)
            })
            .collect();
        raw.insert("custom", custom);

        raw.with("defaultAttribute", self.default_attribute.as_str())
            .with("defaultPosition", self.default_position.as_str())
            .with("removeInlinedAssets", self.remove_inlined_assets)
    }
}

fn patterns_raw(patterns: &[Pattern]) -> RawValue {
    RawValue::Array(
        patterns
            .iter()
            .map(|p| match p {
                Pattern::Literal(s) => RawValue::String(s.clone()),
                Pattern::Regex(re) => RawValue::Regex(re.clone()),
            })
            .collect(),
    )
}

fn attribute_rule_raw(rule: &AttributeRule) -> RawValue {
    RawValue::object()
        .with("test", patterns_raw(&rule.patterns))
        .with("position", rule.position.as_str())
}

fn hint_rule_raw(rule: &ResourceHintRule) -> RawValue {
    RawValue::object()
        .with("test", patterns_raw(&rule.patterns))
        .with("chunks", rule.chunk_scope.as_str())
        .with("position", rule.position.as_str())
}
