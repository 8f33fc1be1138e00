//! Wildcard key exclusion.
//!
//! Exclusion patterns suppress data keys from being attached to events:
//! - `Password` - exact key, any casing
//! - `Ignore*` - any key starting with `ignore`
//! - `*Secret*` - any key containing `secret`
//!
//! Only `*` is a wildcard; every other character matches literally.

use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

/// A single compiled exclusion pattern.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    /// Pattern as configured.
    pattern: String,
    /// Compiled matcher (None for literal patterns).
    matcher: Option<GlobMatcher>,
}

impl ExclusionPattern {
    /// Compile a pattern.
    ///
    /// A pattern that cannot be compiled degrades to a literal,
    /// case-insensitive comparison instead of being rejected.
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();

        let matcher = if pattern.contains('*') {
            match GlobBuilder::new(&Self::to_glob(&pattern))
                .case_insensitive(true)
                .literal_separator(false)
                .backslash_escape(true)
                .build()
            {
                Ok(glob) => Some(glob.compile_matcher()),
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "exclusion pattern treated as literal");
                    None
                }
            }
        } else {
            None
        };

        Self { pattern, matcher }
    }

    /// Translate to glob syntax: runs of `*` collapse to one, all other
    /// glob metacharacters are escaped.
    fn to_glob(pattern: &str) -> String {
        let mut glob = String::with_capacity(pattern.len() + 8);
        for c in pattern.chars() {
            match c {
                '*' if glob.ends_with('*') && !glob.ends_with("\\*") => {}
                '*' => glob.push('*'),
                '?' | '[' | ']' | '{' | '}' | '\\' | '!' | '^' | ',' => {
                    glob.push('\\');
                    glob.push(c);
                }
                _ => glob.push(c),
            }
        }
        glob
    }

    /// Check if a key matches this pattern.
    pub fn matches(&self, key: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(key),
            None => self.pattern.to_lowercase() == key.to_lowercase(),
        }
    }

    /// Get the pattern string.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Check if this is a wildcard pattern.
    pub fn is_wildcard(&self) -> bool {
        self.matcher.is_some()
    }
}

/// Case-insensitive wildcard filter over data keys.
#[derive(Debug, Clone, Default)]
pub struct ExclusionMatcher {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionMatcher {
    /// Create a matcher that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a matcher from pattern strings.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| ExclusionPattern::new(p.as_ref()))
                .collect(),
        }
    }

    /// Check if a key is excluded by any pattern.
    pub fn is_excluded(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(key))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// No patterns configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matcher_excludes_nothing() {
        let matcher = ExclusionMatcher::new();
        assert!(!matcher.is_excluded("Message"));
        assert!(!matcher.is_excluded(""));
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_prefix_wildcard() {
        let matcher = ExclusionMatcher::from_patterns(["Ignore*"]);
        assert!(matcher.is_excluded("Ignored"));
        assert!(matcher.is_excluded("ignored_property"));
        assert!(matcher.is_excluded("IGNORE"));
        assert!(!matcher.is_excluded("Message"));
        assert!(!matcher.is_excluded("random_value"));
    }

    #[test]
    fn test_suffix_and_infix_wildcards() {
        let matcher = ExclusionMatcher::from_patterns(["*password", "*secret*"]);
        assert!(matcher.is_excluded("UserPassword"));
        assert!(matcher.is_excluded("password"));
        assert!(!matcher.is_excluded("password_hint"));
        assert!(matcher.is_excluded("my_Secret_key"));
    }

    #[test]
    fn test_inner_wildcard() {
        let matcher = ExclusionMatcher::from_patterns(["api*key"]);
        assert!(matcher.is_excluded("ApiKey"));
        assert!(matcher.is_excluded("api_private_key"));
        assert!(!matcher.is_excluded("api_token"));
    }

    #[test]
    fn test_literal_pattern_is_case_insensitive() {
        let matcher = ExclusionMatcher::from_patterns(["Password"]);
        assert!(matcher.is_excluded("password"));
        assert!(!matcher.is_excluded("passwords"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = ExclusionMatcher::from_patterns(["a?c*", "[x]*", "{a,b}*", "path/*"]);
        assert!(matcher.is_excluded("a?c"));
        assert!(!matcher.is_excluded("abc"));
        assert!(matcher.is_excluded("[x]value"));
        assert!(!matcher.is_excluded("xvalue"));
        assert!(matcher.is_excluded("{a,b}"));
        assert!(!matcher.is_excluded("a"));
        assert!(matcher.is_excluded("path/to/key"));
    }

    #[test]
    fn test_collapsed_stars() {
        let pattern = ExclusionPattern::new("Ignore**Me");
        assert!(pattern.is_wildcard());
        assert!(pattern.matches("IgnoreMe"));
        assert!(pattern.matches("ignore_all_of_me"));
    }

    #[test]
    fn test_lone_star_matches_everything() {
        let matcher = ExclusionMatcher::from_patterns(["*"]);
        assert!(matcher.is_excluded(""));
        assert!(matcher.is_excluded("anything/at all"));
    }
}
