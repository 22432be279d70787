//! 宿主 HTML 生成阶段传入/传出的标签数据

use serde::{Deserialize, Serialize};
use scriptext_engine::{ProcessedTags, TagDescriptor};

/// 单个文档的 head / body 标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPluginData {
    #[serde(default)]
    pub head: Vec<TagDescriptor>,
    #[serde(default)]
    pub body: Vec<TagDescriptor>,
    /// 生成的 HTML 文件名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
}

impl HtmlPluginData {
    pub fn new(head: Vec<TagDescriptor>, body: Vec<TagDescriptor>) -> Self {
        Self {
            head,
            body,
            output_name: None,
        }
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// 全部标签（head 在前）
    pub fn tags(&self) -> impl Iterator<Item = &TagDescriptor> {
        self.head.iter().chain(self.body.iter())
    }

    pub(crate) fn replace_tags(mut self, processed: ProcessedTags) -> Self {
        self.head = processed.head;
        self.body = processed.body;
        self
    }
}
