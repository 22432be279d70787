//! 插件核心：持有归一化配置，对接宿主的两个钩子
use std::sync::Arc;

use tracing::{debug, info};
use scriptext_engine::{normalize, Configuration, RawOptions, RawValue, TagProcessor};

use super::html_data::HtmlPluginData;
use crate::compilation::Compilation;
use crate::error::ScriptExtResult;

/// script 标签改写插件
/// 配置在构建时归一化一次，之后只读，可在多个文档间共享
#[derive(Debug, Clone)]
pub struct ScriptExtPlugin {
    processor: Arc<TagProcessor>,
}

impl Default for ScriptExtPlugin {
    fn default() -> Self {
        Self::with_configuration(Configuration::default())
    }
}

impl ScriptExtPlugin {
    /// 从原始选项创建；非法配置立即报错
    pub fn new(options: &RawOptions) -> ScriptExtResult<Self> {
        let config = normalize(options)?;
        Ok(Self::with_configuration(config))
    }

    /// 从 JSON 文本创建
    pub fn from_json(text: &str) -> ScriptExtResult<Self> {
        let options = RawValue::from_json_str(text)?;
        Self::new(&options)
    }

    pub fn with_configuration(config: Configuration) -> Self {
        Self {
            processor: Arc::new(TagProcessor::new(config)),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        self.processor.configuration()
    }

    /// 文档处理钩子：改写 script、追加资源提示、重新排序
    /// 出错时宿主应中止该文档的生成
    pub fn alter_asset_tags(
        &self,
        compilation: &Compilation,
        mut data: HtmlPluginData,
    ) -> ScriptExtResult<HtmlPluginData> {
        let name = data.output_name.as_deref().unwrap_or("<unnamed>");
        debug!("alter_asset_tags 开始：{}", name);

        let ctx = compilation.host_context();
        let head = std::mem::take(&mut data.head);
        let body = std::mem::take(&mut data.body);
        let processed = self.processor.process(&ctx, head, body)?;

        debug!("alter_asset_tags 完成：head={}, body={}", processed.head.len(), processed.body.len());
        Ok(data.replace_tags(processed))
    }

    /// 资源输出钩子：删除已内联的资源，返回被删除的资源名
    pub fn emit(&self, compilation: &mut Compilation) -> Vec<String> {
        let removed = self.processor.remove_inlined_assets(compilation);
        if !removed.is_empty() {
            info!("已删除 {} 个内联资源：{}", removed.len(), removed.join(", "));
        }
        removed
    }
}
