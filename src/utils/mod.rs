//! 通用工具
pub mod tag_renderer;

pub use self::tag_renderer::TagRenderer;
