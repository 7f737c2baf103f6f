//! Compiled variable-key patterns.

use regex::Regex;

use crate::error::{DiffError, DiffResult};

/// Keys compared as unordered sets when no override is configured.
pub const DEFAULT_SET_LIKE_KEYS: &[&str] = &["^foreman_host_collections$"];

/// A list of compiled key regexes.
///
/// A key matches when any pattern finds a match anywhere in it (search, not
/// full match); anchor a pattern with `^...$` to require an exact key.
#[derive(Clone, Debug, Default)]
pub struct KeyPatterns {
    patterns: Vec<Regex>,
}

impl KeyPatterns {
    /// An empty pattern list, which matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile every source pattern, failing on the first invalid one.
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> DiffResult<Self> {
        let patterns = sources
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Regex::new(s).map_err(|source| DiffError::InvalidPattern {
                    pattern: s.to_string(),
                    source,
                })
            })
            .collect::<DiffResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The default set-like key patterns.
    pub fn default_set_like() -> DiffResult<Self> {
        Self::compile(DEFAULT_SET_LIKE_KEYS)
    }

    /// Returns `true` if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if any pattern matches somewhere in `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(key))
    }

    /// The source text of each pattern, in configuration order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let p = KeyPatterns::empty();
        assert!(p.is_empty());
        assert!(!p.matches("anything"));
    }

    #[test]
    fn search_semantics() {
        let p = KeyPatterns::compile(&["build"]).unwrap();
        assert!(p.matches("build_id"));
        assert!(p.matches("last_build"));
        assert!(!p.matches("bld"));
    }

    #[test]
    fn anchored_pattern_requires_exact_key() {
        let p = KeyPatterns::compile(&["^(build_id)$"]).unwrap();
        assert!(p.matches("build_id"));
        assert!(!p.matches("build_id_old"));
    }

    #[test]
    fn any_pattern_matches() {
        let p = KeyPatterns::compile(&["^a$", "^b$"]).unwrap();
        assert_eq!(p.len(), 2);
        assert!(p.matches("a"));
        assert!(p.matches("b"));
        assert!(!p.matches("c"));
        assert_eq!(p.sources().collect::<Vec<_>>(), vec!["^a$", "^b$"]);
    }

    #[test]
    fn invalid_pattern_reports_source() {
        let err = KeyPatterns::compile(&["ok", "(unclosed"]).unwrap_err();
        let DiffError::InvalidPattern { pattern, .. } = &err;
        assert_eq!(pattern, "(unclosed");
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn default_set_like_keys() {
        let p = KeyPatterns::default_set_like().unwrap();
        assert!(p.matches("foreman_host_collections"));
        assert!(!p.matches("foreman_host_collections_extra"));
    }
}
