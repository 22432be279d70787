//! 标签分类与改写：script 属性改写 + 资源提示生成
pub mod rewriter;
pub mod resource_hints;

pub use self::resource_hints::{async_chunk_hints, create_resource_hint, initial_chunk_hints, select_hint};
pub use self::rewriter::{apply_custom_attributes, classify, classify_tag, select_strategy};
