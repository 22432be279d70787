//! 插件模块：文档处理钩子 + 资源清理钩子
pub mod html_data;
pub mod script_ext;

// 导出核心接口
pub use self::html_data::HtmlPluginData;
pub use self::script_ext::ScriptExtPlugin;
