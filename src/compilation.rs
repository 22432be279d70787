//! 宿主编译结果快照
//! 资源表 + chunk 列表 + 输出选项，可从 JSON 反序列化

use std::borrow::Cow;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use scriptext_engine::{AssetRegistry, ChunkInfo, HostContext, OutputOptions};

use crate::error::ScriptExtResult;
use crate::plugin::HtmlPluginData;

/// 一次构建的产物
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    /// 输出文件名 → 源码
    #[serde(default)]
    pub assets: FxHashMap<String, String>,
    #[serde(default)]
    pub chunks: Vec<ChunkInfo>,
    #[serde(default)]
    pub output: OutputOptions,
}

impl Compilation {
    pub fn new(output: OutputOptions) -> Self {
        Self {
            output,
            ..Default::default()
        }
    }

    pub fn with_asset(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.assets.insert(name.into(), source.into());
        self
    }

    pub fn with_chunk(mut self, chunk: ChunkInfo) -> Self {
        self.chunks.push(chunk);
        self
    }

    /// 内核所需的只读宿主视图
    pub fn host_context(&self) -> HostContext<'_, Self> {
        HostContext::new(self, &self.chunks, &self.output)
    }
}

impl AssetRegistry for Compilation {
    fn asset_source(&self, name: &str) -> Option<Cow<'_, str>> {
        self.assets.asset_source(name)
    }

    fn asset_names(&self) -> Vec<String> {
        self.assets.asset_names()
    }

    fn remove_asset(&mut self, name: &str) -> bool {
        self.assets.remove_asset(name)
    }
}

/// 完整的文档处理输入：编译产物 + 宿主生成的 head/body 标签
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilationSnapshot {
    #[serde(flatten)]
    pub compilation: Compilation,
    #[serde(flatten)]
    pub document: HtmlPluginData,
}

impl CompilationSnapshot {
    pub fn from_json(text: &str) -> ScriptExtResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ScriptExtResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
