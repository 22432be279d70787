//! preload / prefetch 资源提示生成
//! 候选来源：已有标签（initial） 与 非 initial chunk 的文件（async）

use std::collections::HashSet;

use log::debug;

use super::rewriter::apply_custom_attributes;
use crate::core::{ChunkKind, Configuration, HintRel, TagDescriptor};
use crate::host::{ChunkInfo, OutputOptions};

/// 选择提示类型；preload 优先于 prefetch
pub fn select_hint(config: &Configuration, name: &str, kind: ChunkKind) -> Option<HintRel> {
    if config.preload.options_match(name, kind) {
        Some(HintRel::Preload)
    } else if config.prefetch.options_match(name, kind) {
        Some(HintRel::Prefetch)
    } else {
        None
    }
}

/// 基于已有标签的提示（按发现顺序）
/// href 使用原始 src，保留 publicPath 前缀
pub fn initial_chunk_hints(
    config: &Configuration,
    output: &OutputOptions,
    tags: &[TagDescriptor],
) -> Vec<TagDescriptor> {
    tags.iter()
        .filter_map(|tag| {
            let raw = tag.src()?;
            let name = output.script_name(raw);
            let rel = select_hint(config, name, ChunkKind::Initial)?;
            Some(create_resource_hint(config, rel, raw, name))
        })
        .collect()
}

/// 基于非 initial chunk 文件的提示
/// 已作为标签 src 出现的文件跳过
pub fn async_chunk_hints<'a>(
    config: &Configuration,
    output: &OutputOptions,
    chunks: &[ChunkInfo],
    emitted: impl IntoIterator<Item = &'a TagDescriptor>,
) -> Vec<TagDescriptor> {
    let seen: HashSet<&str> = emitted
        .into_iter()
        .filter_map(|tag| tag.src())
        .map(|src| output.script_name(src))
        .collect();

    chunks
        .iter()
        .filter(|chunk| !chunk.initial)
        .flat_map(|chunk| chunk.files.iter())
        .filter(|file| !seen.contains(file.as_str()))
        .filter_map(|file| {
            let rel = select_hint(config, file, ChunkKind::Async)?;
            Some(create_resource_hint(config, rel, &output.asset_href(file), file))
        })
        .collect()
}

/// `<link rel=... href=... as="script">`，并附加对该逻辑名命中的自定义属性
pub fn create_resource_hint(
    config: &Configuration,
    rel: HintRel,
    href: &str,
    name: &str,
) -> TagDescriptor {
    let mut link = TagDescriptor::new("link")
        .with_attr("rel", rel.as_str())
        .with_attr("href", href)
        .with_attr("as", "script");
    apply_custom_attributes(config, name, &mut link.attributes);
    debug!("添加资源提示：{} -> {}", rel.as_str(), href);
    link
}
