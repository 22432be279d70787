//! 配置模块：弱类型输入 → 归一化规则集
pub mod raw;
pub mod normalizer;

pub use self::normalizer::normalize;
pub use self::raw::{RawOptions, RawValue};
