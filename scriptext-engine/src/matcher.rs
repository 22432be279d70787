//! 名称匹配谓词
//! 脚本名匹配、资源文件名匹配（删除）、chunk 文件匹配共用同一实现

use crate::core::Pattern;

/// 任一模式命中即返回true（短路）；空模式列表永不匹配
#[inline]
pub fn matches(candidate: &str, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(candidate))
}

/// 返回首个命中的模式（用于调试日志）
#[inline]
pub fn first_match<'a>(candidate: &str, patterns: &'a [Pattern]) -> Option<&'a Pattern> {
    patterns.iter().find(|pattern| pattern.is_match(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn re(s: &str) -> Pattern {
        Pattern::Regex(Regex::new(s).unwrap())
    }

    #[test]
    fn test_empty_patterns_match_nothing() {
        for name in ["", "a.js", "anything/at/all.js"] {
            assert!(!matches(name, &[]));
        }
    }

    #[test]
    fn test_literal_is_unanchored_substring() {
        let patterns = vec![Pattern::from("b")];
        assert!(matches("b.js", &patterns));
        assert!(matches("ab.js", &patterns));
        assert!(matches("sub.js", &patterns));
        assert!(!matches("a.js", &patterns));
    }

    #[test]
    fn test_regex_uses_search_semantics() {
        let patterns = vec![re("^a.*")];
        assert!(matches("a.js", &patterns));
        assert!(!matches("ba.js", &patterns));

        // 不要求整串匹配
        assert!(matches("vendor.min.js", &[re(r"min\.")]));
    }

    #[test]
    fn test_mixed_patterns_short_circuit_on_first_hit() {
        let patterns = vec![Pattern::from("zzz"), re("c"), Pattern::from("c")];
        let hit = first_match("c.js", &patterns).unwrap();
        assert_eq!(hit, &re("c"));
    }
}
