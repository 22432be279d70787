use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::CoreError;

/// 脚本加载策略（三者互斥）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadingStrategy {
    #[default]
    Sync,
    Async,
    Defer,
}

impl LoadingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadingStrategy::Sync => "sync",
            LoadingStrategy::Async => "async",
            LoadingStrategy::Defer => "defer",
        }
    }
}

impl Display for LoadingStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadingStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(LoadingStrategy::Sync),
            "async" => Ok(LoadingStrategy::Async),
            "defer" => Ok(LoadingStrategy::Defer),
            other => Err(CoreError::config(format!(
                "invalid default attribute '{}', expected one of sync/async/defer",
                other
            ))),
        }
    }
}

/// 文档中的六个标准插入槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    HeadTop,
    Head,
    HeadBottom,
    BodyTop,
    Body,
    BodyBottom,
}

impl Slot {
    /// 固定输出顺序
    pub const ALL: [Slot; 6] = [
        Slot::HeadTop,
        Slot::Head,
        Slot::HeadBottom,
        Slot::BodyTop,
        Slot::Body,
        Slot::BodyBottom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::HeadTop => "head-top",
            Slot::Head => "head",
            Slot::HeadBottom => "head-bottom",
            Slot::BodyTop => "body-top",
            Slot::Body => "body",
            Slot::BodyBottom => "body-bottom",
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| CoreError::config(format!("unknown position '{}'", s)))
    }
}

/// 规则声明的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RulePosition {
    /// 沿用 defaultPosition
    #[default]
    InheritDefault,
    Slot(Slot),
}

impl RulePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulePosition::InheritDefault => "inherit-default",
            RulePosition::Slot(slot) => slot.as_str(),
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, RulePosition::Slot(_))
    }
}

impl FromStr for RulePosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugin" | "inherit-default" => Ok(RulePosition::InheritDefault),
            other => other.parse().map(RulePosition::Slot),
        }
    }
}

/// 全局默认位置；Plugin 表示保持宿主原始的 head/body 归属
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DefaultPosition {
    #[default]
    Plugin,
    Slot(Slot),
}

impl DefaultPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefaultPosition::Plugin => "plugin",
            DefaultPosition::Slot(slot) => slot.as_str(),
        }
    }
}

impl FromStr for DefaultPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugin" => Ok(DefaultPosition::Plugin),
            other => other.parse().map(DefaultPosition::Slot),
        }
    }
}

/// 资源提示规则适用的 chunk 范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    #[default]
    Initial,
    Async,
    All,
}

impl ChunkScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkScope::Initial => "initial",
            ChunkScope::Async => "async",
            ChunkScope::All => "all",
        }
    }

    /// all 同时覆盖 initial 与 async
    #[inline]
    pub fn covers(&self, kind: ChunkKind) -> bool {
        match self {
            ChunkScope::All => true,
            ChunkScope::Initial => kind == ChunkKind::Initial,
            ChunkScope::Async => kind == ChunkKind::Async,
        }
    }
}

impl FromStr for ChunkScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(ChunkScope::Initial),
            "async" => Ok(ChunkScope::Async),
            "all" => Ok(ChunkScope::All),
            other => Err(CoreError::config(format!(
                "invalid chunks value '{}', expected one of initial/async/all",
                other
            ))),
        }
    }
}

/// 候选资源的 chunk 类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Initial,
    Async,
}

/// 资源提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintRel {
    Preload,
    Prefetch,
}

impl HintRel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HintRel::Preload => "preload",
            HintRel::Prefetch => "prefetch",
        }
    }
}

/// 排序用的标签类型键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Inline,
    Sync,
    Async,
    Defer,
    Module,
    Prefetch,
    Preload,
    Other,
}

impl Display for TagType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TagType::Inline => "inline",
            TagType::Sync => "sync",
            TagType::Async => "async",
            TagType::Defer => "defer",
            TagType::Module => "module",
            TagType::Prefetch => "prefetch",
            TagType::Preload => "preload",
            TagType::Other => "other",
        };
        f.write_str(name)
    }
}

/// 宿主放置标签时所在的文档半区
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Half {
    Head,
    Body,
}

impl Half {
    /// 半区的中间槽位
    pub fn middle(&self) -> Slot {
        match self {
            Half::Head => Slot::Head,
            Half::Body => Slot::Body,
        }
    }
}
