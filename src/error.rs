//! 全局错误类型定义

use thiserror::Error;
use scriptext_engine::CoreError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum ScriptExtError {
    // 内核错误（配置非法 / 内联资源缺失 / 正则编译失败）
    #[error(transparent)]
    Core(#[from] CoreError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

impl ScriptExtError {
    /// 是否为配置错误
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ScriptExtError::Core(CoreError::ConfigurationError(_) | CoreError::RegexCompileError(_)))
    }
}

// 全局Result类型
pub type ScriptExtResult<T> = Result<T, ScriptExtError>;
