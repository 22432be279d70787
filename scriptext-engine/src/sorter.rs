//! 标签放置排序：按类型键归入六个标准槽位，槽内保持原相对顺序

use log::debug;

use crate::core::{Configuration, Half, Slot, TagDescriptor, TagType};

/// 根据改写后的属性推导类型键
/// module 优先于加载策略
pub fn type_of_tag(tag: &TagDescriptor) -> TagType {
    match tag.tag_name.as_str() {
        "script" => {
            if tag.has_inline_body() {
                TagType::Inline
            } else if tag.attributes.get_str("type") == Some("module") {
                TagType::Module
            } else if tag.attributes.contains("async") {
                TagType::Async
            } else if tag.attributes.contains("defer") {
                TagType::Defer
            } else {
                TagType::Sync
            }
        }
        "link" => match tag.attributes.get_str("rel") {
            Some("preload") => TagType::Preload,
            Some("prefetch") => TagType::Prefetch,
            _ => TagType::Other,
        },
        _ => TagType::Other,
    }
}

/// 重新分配 head / body 标签
pub fn sort(
    config: &Configuration,
    head: Vec<TagDescriptor>,
    body: Vec<TagDescriptor>,
) -> (Vec<TagDescriptor>, Vec<TagDescriptor>) {
    let mut buckets: [Vec<TagDescriptor>; 6] = std::array::from_fn(|_| Vec::new());

    let placed = head
        .into_iter()
        .map(|tag| (Half::Head, tag))
        .chain(body.into_iter().map(|tag| (Half::Body, tag)));
    for (half, tag) in placed {
        let slot = config.slot_for(type_of_tag(&tag), half);
        buckets[slot.index()].push(tag);
    }

    for slot in Slot::ALL {
        let count = buckets[slot.index()].len();
        if count > 0 {
            debug!("槽位 {}：{} 个标签", slot, count);
        }
    }

    let [head_top, head_mid, head_bottom, body_top, body_mid, body_bottom] = buckets;
    let head = [head_top, head_mid, head_bottom].into_iter().flatten().collect();
    let body = [body_top, body_mid, body_bottom].into_iter().flatten().collect();
    (head, body)
}
