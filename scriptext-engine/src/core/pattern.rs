use regex::Regex;

use super::enums::{ChunkKind, ChunkScope, RulePosition};
use super::tag::AttrValue;
use crate::matcher::matches;

/// 单条匹配模式：字面量子串 或 正则
#[derive(Debug, Clone)]
pub enum Pattern {
    /// 子串匹配（不锚定）
    Literal(String),
    /// 正则搜索匹配（不要求整串匹配）
    Regex(Regex),
}

impl Pattern {
    #[inline]
    pub fn is_match(&self, candidate: &str) -> bool {
        match self {
            Pattern::Literal(s) => candidate.contains(s.as_str()),
            Pattern::Regex(re) => re.is_match(candidate),
        }
    }

    /// 规则描述（用于日志输出）
    pub fn describe(&self) -> String {
        match self {
            Pattern::Literal(s) => format!("contains: {}", s),
            Pattern::Regex(re) => format!("regex: /{}/", re.as_str()),
        }
    }
}

// 正则按源码比较；flags 须以内联标志组写在源码里（RegexBuilder 上的设置不可见）
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Literal(a), Pattern::Literal(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(s.to_string())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(s)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Regex(re)
    }
}

/// 带位置的规则（inline/sync/async/defer/module）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeRule {
    pub patterns: Vec<Pattern>,
    pub position: RulePosition,
}

impl AttributeRule {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns,
            position: RulePosition::InheritDefault,
        }
    }

    pub fn with_position(mut self, position: RulePosition) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        matches(candidate, &self.patterns)
    }
}

/// 资源提示规则（preload/prefetch）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceHintRule {
    pub patterns: Vec<Pattern>,
    pub chunk_scope: ChunkScope,
    pub position: RulePosition,
}

impl ResourceHintRule {
    pub fn new(patterns: Vec<Pattern>, chunk_scope: ChunkScope) -> Self {
        Self {
            patterns,
            chunk_scope,
            position: RulePosition::InheritDefault,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// chunk 范围 与 名称 同时命中
    #[inline]
    pub fn options_match(&self, candidate: &str, kind: ChunkKind) -> bool {
        self.chunk_scope.covers(kind) && matches(candidate, &self.patterns)
    }
}

/// 自定义属性规则；多条规则可同时生效
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttributeRule {
    pub patterns: Vec<Pattern>,
    pub attribute: String,
    pub value: AttrValue,
}

impl CustomAttributeRule {
    pub fn new(patterns: Vec<Pattern>, attribute: impl Into<String>, value: AttrValue) -> Self {
        Self {
            patterns,
            attribute: attribute.into(),
            value,
        }
    }

    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        matches(candidate, &self.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_literal_is_substring() {
        let pattern = Pattern::from("chunk");
        assert!(pattern.is_match("async-chunk1.js"));
        assert!(!pattern.is_match("index.js"));
        assert_eq!(pattern, Pattern::from("chunk".to_string()));
    }

    #[test]
    fn test_pattern_regex_equality_uses_source() {
        let a = Pattern::from(Regex::new(r"\.js$").unwrap());
        let b = Pattern::from(Regex::new(r"\.js$").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, Pattern::from(r"\.js$"));
    }

    #[test]
    fn test_pattern_regex_equality_sees_inline_flags() {
        let plain = Pattern::from(Regex::new("^a").unwrap());
        let folded = Pattern::from(Regex::new("(?i)^a").unwrap());
        assert_ne!(plain, folded);
        assert!(folded.is_match("A.js"));
        assert!(!plain.is_match("A.js"));
    }

    #[test]
    fn test_hint_rule_requires_scope_and_name() {
        let rule = ResourceHintRule::new(vec![Pattern::from("a")], ChunkScope::Async);
        assert!(rule.options_match("a.js", ChunkKind::Async));
        assert!(!rule.options_match("a.js", ChunkKind::Initial));
        assert!(!rule.options_match("b.js", ChunkKind::Async));
    }
}
