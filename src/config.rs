//! 插件配置管理：默认配置 + 流式构建器

use scriptext_engine::{
    ChunkScope, Configuration, DefaultPosition, LoadingStrategy, RawOptions, RawValue,
    DEFAULT_CONFIGURATION, normalize,
};

use crate::error::ScriptExtResult;

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> Configuration {
        DEFAULT_CONFIGURATION.clone()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器：累积原始选项，`build()` 时统一归一化
#[derive(Debug, Clone)]
pub struct CustomConfigBuilder {
    raw: RawOptions,
}

impl Default for CustomConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawValue::object(),
        }
    }

    pub fn inline(self, patterns: impl Into<RawValue>) -> Self {
        self.set("inline", patterns)
    }

    pub fn sync(self, patterns: impl Into<RawValue>) -> Self {
        self.set("sync", patterns)
    }

    pub fn async_(self, patterns: impl Into<RawValue>) -> Self {
        self.set("async", patterns)
    }

    pub fn defer(self, patterns: impl Into<RawValue>) -> Self {
        self.set("defer", patterns)
    }

    pub fn module(self, patterns: impl Into<RawValue>) -> Self {
        self.set("module", patterns)
    }

    pub fn preload(self, patterns: impl Into<RawValue>, chunks: ChunkScope) -> Self {
        self.set("preload", hint_rule(patterns, chunks))
    }

    pub fn prefetch(self, patterns: impl Into<RawValue>, chunks: ChunkScope) -> Self {
        self.set("prefetch", hint_rule(patterns, chunks))
    }

    /// 追加一条自定义属性规则；value 为 None 时渲染为无值属性
    pub fn custom(mut self, patterns: impl Into<RawValue>, attribute: &str, value: Option<&str>) -> Self {
        let mut rule = RawValue::object()
            .with("test", patterns)
            .with("attribute", attribute);
        if let Some(value) = value {
            rule.insert("value", value);
        }

        let mut rules = match self.raw.get("custom") {
            Some(RawValue::Array(existing)) => existing.clone(),
            _ => Vec::new(),
        };
        rules.push(rule);
        self.raw.insert("custom", RawValue::Array(rules));
        self
    }

    pub fn default_attribute(self, strategy: LoadingStrategy) -> Self {
        self.set("defaultAttribute", strategy.as_str())
    }

    pub fn default_position(self, position: DefaultPosition) -> Self {
        self.set("defaultPosition", position.as_str())
    }

    pub fn remove_inlined_assets(self, remove: bool) -> Self {
        self.set("removeInlinedAssets", remove)
    }

    /// 原始选项（未归一化）
    pub fn raw(&self) -> &RawOptions {
        &self.raw
    }

    pub fn build(self) -> ScriptExtResult<Configuration> {
        Ok(normalize(&self.raw)?)
    }

    fn set(mut self, key: &str, value: impl Into<RawValue>) -> Self {
        self.raw.insert(key, value);
        self
    }
}

fn hint_rule(patterns: impl Into<RawValue>, chunks: ChunkScope) -> RawValue {
    RawValue::object()
        .with("test", patterns)
        .with("chunks", chunks.as_str())
}
