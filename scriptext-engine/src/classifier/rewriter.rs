//! `<script>` 标签分类与改写
//! 每个标签产出新的描述（拷贝后修改），输入列表保持不变

use log::debug;

use crate::core::{Attributes, Configuration, LoadingStrategy, TagDescriptor};
use crate::error::{CoreError, CoreResult};
use crate::host::{AssetRegistry, OutputOptions};
use crate::utils::describe_tag;

/// 改写一组标签；非 script 标签原样透传
/// 任一 inline 目标缺失即中止整个处理，不返回部分结果
pub fn classify<A: AssetRegistry + ?Sized>(
    config: &Configuration,
    assets: &A,
    output: &OutputOptions,
    tags: &[TagDescriptor],
) -> CoreResult<Vec<TagDescriptor>> {
    tags.iter()
        .map(|tag| classify_tag(config, assets, output, tag))
        .collect()
}

/// 单个标签改写
pub fn classify_tag<A: AssetRegistry + ?Sized>(
    config: &Configuration,
    assets: &A,
    output: &OutputOptions,
    tag: &TagDescriptor,
) -> CoreResult<TagDescriptor> {
    if !tag.is_script() {
        return Ok(tag.clone());
    }
    // 模板自带的内联脚本没有 src，无可匹配的名称
    let Some(src) = tag.src() else {
        return Ok(tag.clone());
    };

    debug!("处理 <script> 标签：{}", describe_tag(tag));
    let script_name = output.script_name(src);

    let rewritten = if config.inline.matches(script_name) {
        replace_with_inline(assets, script_name)?
    } else {
        update_src_element(config, script_name, tag)
    };

    debug!("改写结果：{}", describe_tag(&rewritten));
    Ok(rewritten)
}

/// 替换为带内容的 `<script>`，不再做任何属性处理
fn replace_with_inline<A: AssetRegistry + ?Sized>(
    assets: &A,
    script_name: &str,
) -> CoreResult<TagDescriptor> {
    let source = assets
        .asset_source(script_name)
        .ok_or_else(|| CoreError::AssetNotFound(script_name.to_string()))?;
    Ok(TagDescriptor::inline_script(source.into_owned()))
}

fn update_src_element(config: &Configuration, script_name: &str, tag: &TagDescriptor) -> TagDescriptor {
    let mut updated = tag.clone();

    // sync 是标记中的默认行为，不添加属性
    let strategy = select_strategy(config, script_name);
    if strategy != LoadingStrategy::Sync {
        updated.attributes.set(strategy.as_str(), true);
    }

    // module 与加载策略正交，可覆盖已有的 text/javascript
    if config.module.matches(script_name) {
        updated.attributes.set("type", "module");
    }

    apply_custom_attributes(config, script_name, &mut updated.attributes);
    updated
}

/// 按 sync → async → defer 优先级选择首个命中的策略，均未命中时取默认值
pub fn select_strategy(config: &Configuration, script_name: &str) -> LoadingStrategy {
    config
        .strategy_rules()
        .into_iter()
        .find(|(_, rule)| rule.matches(script_name))
        .map(|(strategy, _)| strategy)
        .unwrap_or(config.default_attribute)
}

/// 应用全部命中的自定义属性；键冲突时后声明的规则生效
pub fn apply_custom_attributes(config: &Configuration, name: &str, attributes: &mut Attributes) {
    for rule in config.custom.iter().filter(|rule| rule.matches(name)) {
        attributes.set(rule.attribute.clone(), rule.value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{normalize, RawValue};
    use crate::core::AttrValue;
    use regex::Regex;
    use rustc_hash::FxHashMap;
    use serde_json::json;

    fn config(value: serde_json::Value) -> Configuration {
        normalize(&RawValue::from_json(&value).unwrap()).unwrap()
    }

    fn assets() -> FxHashMap<String, String> {
        let mut assets = FxHashMap::default();
        assets.insert("a.js".to_string(), "var a;".to_string());
        assets.insert("b.js".to_string(), "console.log(1)".to_string());
        assets.insert("c.js".to_string(), "var c;".to_string());
        assets
    }

    fn script(src: &str) -> TagDescriptor {
        TagDescriptor::script(src).with_attr("type", "text/javascript")
    }

    fn run(config: &Configuration, names: &[&str]) -> Vec<TagDescriptor> {
        let tags: Vec<TagDescriptor> = names.iter().map(|n| script(n)).collect();
        classify(config, &assets(), &OutputOptions::default(), &tags).unwrap()
    }

    #[test]
    fn test_strategy_precedence() {
        let raw = RawValue::object()
            .with("sync", Regex::new("(a|c).*").unwrap())
            .with("async", "c")
            .with("defer", Regex::new("a.*").unwrap())
            .with("defaultAttribute", "defer");
        let config = normalize(&raw).unwrap();

        let picked: Vec<LoadingStrategy> =
            ["a", "b", "c"].iter().map(|n| select_strategy(&config, n)).collect();
        assert_eq!(
            picked,
            vec![LoadingStrategy::Sync, LoadingStrategy::Defer, LoadingStrategy::Sync]
        );
    }

    #[test]
    fn test_sync_precedence_with_defer_default() {
        let config = config(json!({
            "sync": {"regex": "(a|c).*"},
            "async": ["c"],
            "defer": {"regex": "a.*"},
            "defaultAttribute": "defer"
        }));
        let tags = run(&config, &["a.js", "b.js", "c.js"]);

        assert!(!tags[0].attributes.contains("defer"));
        assert!(!tags[0].attributes.contains("async"));
        assert_eq!(tags[1].attributes.get("defer"), Some(&AttrValue::Bool(true)));
        assert!(!tags[2].attributes.contains("async"));
    }

    #[test]
    fn test_async_exceptions_with_sync_default() {
        let config = config(json!({"async": ["a", "b"]}));
        let tags = run(&config, &["a.js", "b.js", "c.js"]);

        assert!(tags[0].attributes.contains("async"));
        assert!(tags[1].attributes.contains("async"));
        assert_eq!(tags[2], script("c.js"));
    }

    #[test]
    fn test_module_is_independent_of_strategy() {
        let config = config(json!({
            "async": ["b"],
            "defer": {"regex": "(a|b)"},
            "module": ["b", "c"]
        }));
        let tags = run(&config, &["a.js", "b.js", "c.js"]);

        assert_eq!(tags[0].attributes.get_str("type"), Some("text/javascript"));
        assert!(tags[0].attributes.contains("defer"));

        assert_eq!(tags[1].attributes.get_str("type"), Some("module"));
        assert!(tags[1].attributes.contains("async"));
        assert!(!tags[1].attributes.contains("defer"));

        assert_eq!(tags[2].attributes.get_str("type"), Some("module"));
        assert!(!tags[2].attributes.contains("async"));

        // type 原位覆盖，保持属性顺序
        let order: Vec<&str> = tags[1].attributes.iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["src", "type", "async"]);
    }

    #[test]
    fn test_inline_replaces_tag_and_skips_attributes() {
        let config = config(json!({
            "inline": ["b"],
            "async": ["b"],
            "module": ["b"],
            "custom": {"test": "b", "attribute": "nonce"},
            "defaultAttribute": "async"
        }));
        let tags = run(&config, &["a.js", "b.js", "c.js"]);

        assert!(tags[0].attributes.contains("async"));
        assert_eq!(tags[1], TagDescriptor::inline_script("console.log(1)"));
        assert!(tags[1].attributes.is_empty());
        assert!(tags[2].attributes.contains("async"));
    }

    #[test]
    fn test_inline_uses_logical_name_behind_public_path() {
        let config = config(json!({"inline": "b"}));
        let output = OutputOptions::new(Some("/subdomain/".into()), true);
        let tags = vec![script("/subdomain/b.js?8c1f")];

        let out = classify(&config, &assets(), &output, &tags).unwrap();
        assert_eq!(out[0].inner_html.as_deref(), Some("console.log(1)"));
    }

    #[test]
    fn test_missing_inline_asset_aborts() {
        let config = config(json!({"inline": "missing"}));
        let tags = vec![script("a.js"), script("missing.js")];

        let err = classify(&config, &assets(), &OutputOptions::default(), &tags).unwrap_err();
        match err {
            CoreError::AssetNotFound(name) => assert_eq!(name, "missing.js"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_custom_attributes_all_apply_last_wins() {
        let config = config(json!({
            "custom": [
                {"test": "a", "attribute": "crossorigin", "value": "use-credentials"},
                {"test": ".js", "attribute": "nomodule"},
                {"test": {"regex": "^a"}, "attribute": "crossorigin", "value": "anonymous"}
            ]
        }));
        let tags = run(&config, &["a.js", "b.js"]);

        assert_eq!(tags[0].attributes.get_str("crossorigin"), Some("anonymous"));
        assert_eq!(tags[0].attributes.get("nomodule"), Some(&AttrValue::Bool(true)));
        assert!(!tags[1].attributes.contains("crossorigin"));
        assert!(tags[1].attributes.contains("nomodule"));
    }

    #[test]
    fn test_non_script_and_srcless_tags_pass_through() {
        let config = config(json!({"defaultAttribute": "async"}));
        let link = TagDescriptor::new("link")
            .with_attr("rel", "stylesheet")
            .with_attr("href", "styles.css");
        let template_script = TagDescriptor::inline_script("window.x = 1");
        let tags = vec![link.clone(), template_script.clone()];

        let out = classify(&config, &assets(), &OutputOptions::default(), &tags).unwrap();
        assert_eq!(out, tags);
    }
}
