use crate::{
    classifier::{async_chunk_hints, classify, initial_chunk_hints},
    core::{Configuration, TagDescriptor},
    host::{AssetRegistry, HostContext},
    matcher::first_match,
    sorter, CoreResult,
};

/// 一次文档处理的输出
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessedTags {
    pub head: Vec<TagDescriptor>,
    pub body: Vec<TagDescriptor>,
}

/// 标签处理器，核心职责：改写 script + 追加资源提示 + 槽位排序 + 内联资源清理
#[derive(Debug, Clone, Default)]
pub struct TagProcessor {
    config: Configuration,
}

impl TagProcessor {
    pub fn new(config: Configuration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// 处理单个文档的 head / body 标签
    /// 任一步骤失败即中止，不返回部分结果
    pub fn process<A: AssetRegistry + ?Sized>(
        &self,
        ctx: &HostContext<'_, A>,
        head: Vec<TagDescriptor>,
        body: Vec<TagDescriptor>,
    ) -> CoreResult<ProcessedTags> {
        log::debug!("处理开始：head={}, body={}", head.len(), body.len());

        let (mut head, body) = if self.config.should_update() {
            log::debug!("改写 <head> <script> 标签");
            let head = classify(&self.config, ctx.assets, ctx.output, &head)?;
            log::debug!("改写 <body> <script> 标签");
            let body = classify(&self.config, ctx.assets, ctx.output, &body)?;
            (head, body)
        } else {
            (head, body)
        };

        if self.config.should_add_hints() {
            let mut hints = initial_chunk_hints(&self.config, ctx.output, &head);
            hints.extend(initial_chunk_hints(&self.config, ctx.output, &body));
            hints.extend(async_chunk_hints(&self.config, ctx.output, ctx.chunks, head.iter().chain(&body)));
            log::debug!("追加资源提示：{} 条", hints.len());
            head.extend(hints);
        }

        let (head, body) = if self.config.should_sort() {
            log::debug!("按槽位重新排序");
            sorter::sort(&self.config, head, body)
        } else {
            (head, body)
        };

        log::debug!("处理完成：head={}, body={}", head.len(), body.len());
        Ok(ProcessedTags { head, body })
    }

    /// 删除已被内联的资源，返回被删除的资源名（已排序）
    pub fn remove_inlined_assets<A: AssetRegistry + ?Sized>(&self, assets: &mut A) -> Vec<String> {
        if self.config.inline.is_empty() || !self.config.remove_inlined_assets {
            return Vec::new();
        }

        let mut removed: Vec<String> = assets
            .asset_names()
            .into_iter()
            .filter(|name| match first_match(name, &self.config.inline.patterns) {
                Some(pattern) => {
                    log::debug!("资源 '{}' 命中 inline 模式 {}", name, pattern.describe());
                    true
                }
                None => false,
            })
            .collect();
        removed.sort();
        removed.retain(|name| assets.remove_asset(name));
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{normalize, RawValue};
    use crate::host::{ChunkInfo, OutputOptions};
    use rustc_hash::FxHashMap;
    use serde_json::json;

    fn build(value: serde_json::Value) -> TagProcessor {
        TagProcessor::new(normalize(&RawValue::from_json(&value).unwrap()).unwrap())
    }

    fn assets() -> FxHashMap<String, String> {
        [("a.js", "var a;"), ("b.js", "console.log(1)"), ("c.js", "var c;"), ("b.js.map", "{}")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn scripts(names: &[&str]) -> Vec<TagDescriptor> {
        names.iter().map(|n| TagDescriptor::script(*n)).collect()
    }

    #[test]
    fn test_default_configuration_leaves_tags_untouched() {
        let _ = env_logger::builder().is_test(true).try_init();
        let processor = TagProcessor::default();
        let assets = assets();
        let output = OutputOptions::default();
        let ctx = HostContext::new(&assets, &[], &output);

        let head = scripts(&["a.js"]);
        let body = scripts(&["b.js", "c.js"]);
        let out = processor.process(&ctx, head.clone(), body.clone()).unwrap();
        assert_eq!(out, ProcessedTags { head, body });
    }

    #[test]
    fn test_inline_then_remove() {
        let processor = build(json!({"inline": ["b"], "defaultAttribute": "async"}));
        let mut assets = assets();
        let output = OutputOptions::default();

        let out = {
            let ctx = HostContext::new(&assets, &[], &output);
            processor.process(&ctx, vec![], scripts(&["a.js", "b.js", "c.js"])).unwrap()
        };
        assert!(out.body[0].attributes.contains("async"));
        assert_eq!(out.body[1], TagDescriptor::inline_script("console.log(1)"));
        assert!(out.body[2].attributes.contains("async"));

        let removed = processor.remove_inlined_assets(&mut assets);
        assert_eq!(removed, vec!["b.js".to_string(), "b.js.map".to_string()]);
        assert!(!assets.contains_key("b.js"));
        assert!(assets.contains_key("a.js"));
    }

    #[test]
    fn test_removal_respects_flag() {
        let processor = build(json!({"inline": "b", "removeInlinedAssets": false}));
        let mut assets = assets();
        assert!(processor.remove_inlined_assets(&mut assets).is_empty());
        assert_eq!(assets.len(), 4);

        let processor = build(json!({"async": "b"}));
        assert!(processor.remove_inlined_assets(&mut assets).is_empty());
    }

    #[test]
    fn test_hints_appended_to_head_in_discovery_order() {
        let processor = build(json!({"prefetch": {"test": {"regex": "\\.js$"}, "chunks": "all"}}));
        let assets = assets();
        let output = OutputOptions::default();
        let chunks = vec![ChunkInfo::non_initial(["chunk.js"])];
        let ctx = HostContext::new(&assets, &chunks, &output);

        let out = processor
            .process(&ctx, scripts(&["a.js"]), scripts(&["b.js"]))
            .unwrap();
        let hrefs: Vec<&str> = out.head[1..]
            .iter()
            .filter_map(|t| t.attributes.get_str("href"))
            .collect();
        assert_eq!(out.head[0], TagDescriptor::script("a.js"));
        assert_eq!(hrefs, vec!["a.js", "b.js", "chunk.js"]);
        assert_eq!(out.body, scripts(&["b.js"]));
    }

    #[test]
    fn test_inlined_script_gets_no_hint() {
        let processor = build(json!({"inline": "b", "preload": ["a", "b"]}));
        let assets = assets();
        let output = OutputOptions::default();
        let ctx = HostContext::new(&assets, &[], &output);

        let out = processor.process(&ctx, vec![], scripts(&["a.js", "b.js"])).unwrap();
        let hints: Vec<&str> = out.head.iter().filter_map(|t| t.attributes.get_str("href")).collect();
        assert_eq!(hints, vec!["a.js"]);
    }

    #[test]
    fn test_missing_inline_asset_returns_error() {
        let processor = build(json!({"inline": "zzz"}));
        let assets = assets();
        let output = OutputOptions::default();
        let ctx = HostContext::new(&assets, &[], &output);

        assert!(processor.process(&ctx, scripts(&["zzz.js"]), vec![]).is_err());
    }

    #[test]
    fn test_sorting_runs_after_hints() {
        let processor = build(json!({
            "defaultAttribute": "defer",
            "preload": {"test": "a", "position": "head-top"},
            "defaultPosition": "body-bottom"
        }));
        let assets = assets();
        let output = OutputOptions::default();
        let ctx = HostContext::new(&assets, &[], &output);

        let out = processor.process(&ctx, scripts(&["a.js"]), vec![]).unwrap();
        assert_eq!(out.head.len(), 1);
        assert_eq!(out.head[0].attributes.get_str("rel"), Some("preload"));
        assert_eq!(out.body.len(), 1);
        assert!(out.body[0].attributes.contains("defer"));
    }

    #[test]
    fn test_empty_asset_inlined_at_rule_position() {
        let processor = build(json!({"inline": {"test": "e", "position": "head-top"}}));
        let mut assets = assets();
        assets.insert("e.js".to_string(), String::new());
        let output = OutputOptions::default();
        let ctx = HostContext::new(&assets, &[], &output);

        let out = processor.process(&ctx, vec![], scripts(&["e.js"])).unwrap();
        assert_eq!(out.head, vec![TagDescriptor::inline_script("")]);
        assert!(out.body.is_empty());
    }

    #[test]
    fn test_chunk_file_emitted_as_tag_gets_single_hint() {
        let processor = build(json!({"prefetch": {"test": "chunk", "chunks": "all"}}));
        let assets = assets();
        let output = OutputOptions::default();
        let chunks = vec![ChunkInfo::non_initial(["chunk.js"]), ChunkInfo::non_initial(["chunk2.js"])];
        let ctx = HostContext::new(&assets, &chunks, &output);

        let out = processor.process(&ctx, vec![], scripts(&["chunk.js"])).unwrap();
        let hrefs: Vec<&str> = out.head.iter().filter_map(|t| t.attributes.get_str("href")).collect();
        assert_eq!(hrefs, vec!["chunk.js", "chunk2.js"]);
    }
}
