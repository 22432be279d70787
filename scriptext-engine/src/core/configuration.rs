//! 归一化后的完整规则集
//! 插件激活时构建一次，此后只读

use once_cell::sync::Lazy;

use super::enums::{DefaultPosition, Half, LoadingStrategy, RulePosition, Slot, TagType};
use super::pattern::{AttributeRule, CustomAttributeRule, ResourceHintRule};

/// 加载策略优先级：sync → async → defer
pub const ATTRIBUTE_PRIORITIES: [LoadingStrategy; 3] = [
    LoadingStrategy::Sync,
    LoadingStrategy::Async,
    LoadingStrategy::Defer,
];

/// 全局默认配置（只读）
pub static DEFAULT_CONFIGURATION: Lazy<Configuration> = Lazy::new(Configuration::default);

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub inline: AttributeRule,
    pub sync: AttributeRule,
    pub async_: AttributeRule,
    pub defer: AttributeRule,
    pub module: AttributeRule,
    pub preload: ResourceHintRule,
    pub prefetch: ResourceHintRule,
    pub custom: Vec<CustomAttributeRule>,
    pub default_attribute: LoadingStrategy,
    pub default_position: DefaultPosition,
    pub remove_inlined_assets: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            inline: AttributeRule::default(),
            sync: AttributeRule::default(),
            async_: AttributeRule::default(),
            defer: AttributeRule::default(),
            module: AttributeRule::default(),
            preload: ResourceHintRule::default(),
            prefetch: ResourceHintRule::default(),
            custom: Vec::new(),
            default_attribute: LoadingStrategy::Sync,
            default_position: DefaultPosition::Plugin,
            remove_inlined_assets: true,
        }
    }
}

impl Configuration {
    /// 加载策略规则，按优先级排列
    pub fn strategy_rules(&self) -> [(LoadingStrategy, &AttributeRule); 3] {
        ATTRIBUTE_PRIORITIES.map(|strategy| (strategy, self.strategy_rule(strategy)))
    }

    pub fn strategy_rule(&self, strategy: LoadingStrategy) -> &AttributeRule {
        match strategy {
            LoadingStrategy::Sync => &self.sync,
            LoadingStrategy::Async => &self.async_,
            LoadingStrategy::Defer => &self.defer,
        }
    }

    /// 脚本改写是否可能产生变化
    /// sync 规则单独存在时不会改变输出
    pub fn should_update(&self) -> bool {
        !(self.default_attribute == LoadingStrategy::Sync
            && self.inline.is_empty()
            && self.async_.is_empty()
            && self.defer.is_empty()
            && self.module.is_empty()
            && self.custom.is_empty())
    }

    /// 是否需要生成资源提示
    pub fn should_add_hints(&self) -> bool {
        !(self.preload.is_empty() && self.prefetch.is_empty())
    }

    /// 是否需要重新排序
    pub fn should_sort(&self) -> bool {
        match self.default_position {
            DefaultPosition::Slot(_) => true,
            DefaultPosition::Plugin => self.rule_positions().iter().any(|p| p.is_explicit()),
        }
    }

    /// 所有可配置位置的规则声明
    fn rule_positions(&self) -> [RulePosition; 7] {
        [
            self.inline.position,
            self.sync.position,
            self.async_.position,
            self.defer.position,
            self.module.position,
            self.prefetch.position,
            self.preload.position,
        ]
    }

    /// 标签类型 → 目标槽位
    /// other 类型永远留在原半区中间槽位
    pub fn slot_for(&self, tag_type: TagType, half: Half) -> Slot {
        let declared = match tag_type {
            TagType::Inline => self.inline.position,
            TagType::Sync => self.sync.position,
            TagType::Async => self.async_.position,
            TagType::Defer => self.defer.position,
            TagType::Module => self.module.position,
            TagType::Prefetch => self.prefetch.position,
            TagType::Preload => self.preload.position,
            TagType::Other => return half.middle(),
        };
        match declared {
            RulePosition::Slot(slot) => slot,
            RulePosition::InheritDefault => match self.default_position {
                DefaultPosition::Slot(slot) => slot,
                DefaultPosition::Plugin => half.middle(),
            },
        }
    }
}
