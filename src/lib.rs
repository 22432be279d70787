//! scriptext - 打包器生成 HTML 的 script 标签改写插件
//! async/defer/module 属性、内联、preload/prefetch 资源提示、标签位置排序

// 导出全局错误类型
pub use self::error::{ScriptExtError, ScriptExtResult};

// 导出配置模块
pub use self::config::{ConfigManager, CustomConfigBuilder};

// 导出插件模块核心接口
pub use self::plugin::{HtmlPluginData, ScriptExtPlugin};

// 导出编译快照
pub use self::compilation::{Compilation, CompilationSnapshot};

// 导出工具模块核心接口
pub use self::utils::TagRenderer;

// 导出内核常用类型
pub use scriptext_engine::{
    AttrValue, Attributes, ChunkInfo, ChunkScope, Configuration, CoreError, DefaultPosition,
    LoadingStrategy, OutputOptions, RawOptions, RawValue, RulePosition, Slot, TagDescriptor,
};
pub use regex::Regex;

// 声明所有子模块
pub mod config;
pub mod error;
pub mod plugin;
pub mod compilation;
pub mod utils;
