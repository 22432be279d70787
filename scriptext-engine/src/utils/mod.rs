pub mod log_format;

pub use log_format::{describe_tag, inline_preview};
