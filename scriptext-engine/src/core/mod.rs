mod enums;
mod pattern;
mod tag;
mod configuration;

// 导出常用项
pub use enums::{
    ChunkKind, ChunkScope, DefaultPosition, Half, HintRel, LoadingStrategy, RulePosition, Slot,
    TagType,
};
pub use pattern::{AttributeRule, CustomAttributeRule, Pattern, ResourceHintRule};
pub use tag::{AttrValue, Attributes, TagDescriptor};
pub use configuration::{Configuration, ATTRIBUTE_PRIORITIES, DEFAULT_CONFIGURATION};
