//! Path mapping module
//!
//! Defines the redirect rule record and the exact-match path→URL map the
//! request handlers consult.

use std::collections::HashMap;

use serde::Deserialize;

/// One redirect rule: an exact request path mapped to a destination URL.
///
/// `path` is expected to be non-empty and begin with `/`. `url` is an opaque
/// destination string; this layer does not validate or normalize it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PathEntry {
    pub path: String,
    pub url: String,
}

/// Exact-match mapping from request path to destination URL.
///
/// Built once from an ordered entry sequence, read-only for the lifetime of
/// the handler that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    paths: HashMap<String, String>,
}

impl PathMap {
    /// Collapse an ordered entry sequence into a map.
    ///
    /// Later entries overwrite earlier ones with the same path. An empty
    /// sequence yields an empty map; construction never fails.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = PathEntry>,
    {
        let mut paths = HashMap::new();
        for entry in entries {
            paths.insert(entry.path, entry.url);
        }
        Self { paths }
    }

    /// Look up the destination URL for a request path.
    ///
    /// Exact match only: no trailing-slash normalization, no case folding.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(String::as_str)
    }

    /// Number of mapped paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl From<HashMap<String, String>> for PathMap {
    fn from(paths: HashMap<String, String>) -> Self {
        Self { paths }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, url: &str) -> PathEntry {
        PathEntry {
            path: path.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_last_entry_wins_on_duplicate_path() {
        let map = PathMap::from_entries(vec![
            entry("/urlshort", "https://example.com/a"),
            entry("/other", "https://example.com/other"),
            entry("/urlshort", "https://example.com/b"),
        ]);

        assert_eq!(map.lookup("/urlshort"), Some("https://example.com/b"));
        assert_eq!(map.lookup("/other"), Some("https://example.com/other"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_sequence_yields_empty_map() {
        let map = PathMap::from_entries(Vec::new());
        assert!(map.is_empty());
        assert_eq!(map.lookup("/anything"), None);
    }

    #[test]
    fn test_lookup_is_exact_match_only() {
        let map = PathMap::from_entries(vec![entry("/about", "https://example.com/about")]);

        assert_eq!(map.lookup("/about"), Some("https://example.com/about"));
        assert_eq!(map.lookup("/about/"), None);
        assert_eq!(map.lookup("/About"), None);
        assert_eq!(map.lookup("/about/team"), None);
    }

    #[test]
    fn test_from_literal_map() {
        let mut paths = HashMap::new();
        paths.insert("/wiki".to_string(), "https://www.wikipedia.org/".to_string());
        let map = PathMap::from(paths);

        assert_eq!(map.lookup("/wiki"), Some("https://www.wikipedia.org/"));
    }
}
