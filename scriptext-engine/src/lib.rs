// 核心公共结构体+枚举
pub mod core;
// 错误定义
pub mod error;
// 名称匹配谓词
pub mod matcher;
// 原始配置解析+归一化
pub mod config;
// 宿主协作接口
pub mod host;
// script 改写+资源提示
pub mod classifier;
// 槽位排序
pub mod sorter;
// 完整处理流程
pub mod processor;
// 日志格式化工具
pub mod utils;

// 顶层导出常用类型
pub use config::{normalize, RawOptions, RawValue};
pub use core::{
    AttrValue, Attributes, AttributeRule, ChunkKind, ChunkScope, Configuration,
    CustomAttributeRule, DefaultPosition, Half, HintRel, LoadingStrategy, Pattern,
    ResourceHintRule, RulePosition, Slot, TagDescriptor, TagType, DEFAULT_CONFIGURATION,
};
pub use error::{CoreError, CoreResult};
pub use host::{AssetRegistry, ChunkInfo, HostContext, OutputOptions};
pub use processor::{ProcessedTags, TagProcessor};
