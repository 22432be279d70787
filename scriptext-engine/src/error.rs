//! scriptext-engine 内核错误定义
//! 封装内核层所有错误，与宿主层错误解耦，基于thiserror实现类型安全处理
use thiserror::Error;

use regex::Error as RegexError;

/// 内核核心错误枚举
/// 任一错误都会中止当前文档处理流程，不返回部分结果
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================== 配置相关错误 =====================
    /// 用户配置非法（defaultAttribute 取值错误 / 规则值类型无法转换）
    #[error("invalid configuration: {0}")]
    ConfigurationError(String),

    /// 正则表达式编译失败（配置中的 regex 模式语法错误）
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // ===================== 改写相关错误 =====================
    /// inline 规则命中，但资源表中不存在对应脚本
    #[error("no asset with href '{0}'")]
    AssetNotFound(String),
}

impl CoreError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        CoreError::ConfigurationError(msg.into())
    }
}

/// 内核层全局Result类型别名
pub type CoreResult<T> = Result<T, CoreError>;
