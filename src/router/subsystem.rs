//! Subsystem Resolver: longest registered prefix wins.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// A registered sub-application prefix and the directory its controllers live in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemEntry {
    /// Path prefix, e.g. `admin` or `admin/reports` (no surrounding `/`)
    pub prefix: String,
    /// Namespace root relative to the controller root; defaults to the prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl SubsystemEntry {
    /// Entry whose namespace root equals its prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_matches('/').to_string(),
            root: None,
        }
    }

    /// Entry with an explicit namespace root.
    #[must_use]
    pub fn with_root(prefix: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.trim_matches('/').to_string(),
            root: Some(root.into()),
        }
    }

    /// Directory (relative to the controller root) holding this subsystem's controllers.
    #[must_use]
    pub fn namespace_root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.prefix))
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.prefix.split('/')
    }

    fn segment_count(&self) -> usize {
        self.prefix.split('/').count()
    }
}

/// Outcome of matching a path against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemMatch<'a> {
    /// Matched entry, `None` when the path belongs to the root application
    pub entry: Option<&'a SubsystemEntry>,
    /// Path with the matched prefix removed
    pub remainder: &'a str,
}

impl SubsystemMatch<'_> {
    /// Matched prefix with its trailing separator (`admin/reports/`), or `""`.
    #[must_use]
    pub fn subsystem(&self) -> String {
        self.entry
            .map(|e| format!("{}/", e.prefix))
            .unwrap_or_default()
    }
}

/// Known subsystem prefixes, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SubsystemRegistry {
    /// Sorted by segment count, longest first
    entries: Vec<SubsystemEntry>,
}

impl SubsystemRegistry {
    /// Build a registry from entries; order of the input does not matter.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = SubsystemEntry>) -> Self {
        let mut entries: Vec<SubsystemEntry> = entries
            .into_iter()
            .filter(|e| !e.prefix.is_empty())
            .collect();
        entries.sort_by(|a, b| b.segment_count().cmp(&a.segment_count()));
        Self { entries }
    }

    /// Registry built from bare prefixes.
    #[must_use]
    pub fn from_prefixes<'a>(prefixes: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(prefixes.into_iter().map(SubsystemEntry::new))
    }

    /// Number of registered subsystems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no subsystem is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&SubsystemEntry> {
        let prefix = prefix.trim_matches('/');
        self.entries.iter().find(|e| e.prefix == prefix)
    }

    /// Match the leading segments of a normalized path against the registry.
    ///
    /// Matching is segment-wise (`admin` does not match `administrator/x`)
    /// and the entry with the most segments wins.
    #[must_use]
    pub fn resolve<'a>(&'a self, path: &'a str) -> SubsystemMatch<'a> {
        for entry in &self.entries {
            if let Some(remainder) = strip_prefix_segments(path, entry) {
                debug!(prefix = %entry.prefix, remainder, "Subsystem matched");
                return SubsystemMatch {
                    entry: Some(entry),
                    remainder,
                };
            }
        }
        SubsystemMatch {
            entry: None,
            remainder: path,
        }
    }
}

fn strip_prefix_segments<'a>(path: &'a str, entry: &SubsystemEntry) -> Option<&'a str> {
    let mut rest = path;
    for segment in entry.segments() {
        let (head, tail) = rest.split_once('/').unwrap_or((rest, ""));
        if !head.eq_ignore_ascii_case(segment) {
            return None;
        }
        rest = tail;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_passes_path_through() {
        let registry = SubsystemRegistry::from_prefixes(["admin"]);
        let m = registry.resolve("blog/show/42");
        assert!(m.entry.is_none());
        assert_eq!(m.remainder, "blog/show/42");
        assert_eq!(m.subsystem(), "");
    }

    #[test]
    fn test_longest_prefix_wins() {
        let registry = SubsystemRegistry::from_prefixes(["admin", "admin/reports"]);
        let m = registry.resolve("admin/reports/x");
        assert_eq!(m.subsystem(), "admin/reports/");
        assert_eq!(m.remainder, "x");

        let m = registry.resolve("admin/users/list");
        assert_eq!(m.subsystem(), "admin/");
        assert_eq!(m.remainder, "users/list");
    }

    #[test]
    fn test_registration_order_irrelevant() {
        let registry = SubsystemRegistry::from_prefixes(["admin/reports", "admin"]);
        assert_eq!(registry.resolve("admin/reports").subsystem(), "admin/reports/");
    }

    #[test]
    fn test_segment_boundaries_respected() {
        let registry = SubsystemRegistry::from_prefixes(["admin"]);
        let m = registry.resolve("administrator/x");
        assert!(m.entry.is_none());
    }

    #[test]
    fn test_prefix_only_path() {
        let registry = SubsystemRegistry::from_prefixes(["admin"]);
        let m = registry.resolve("admin");
        assert_eq!(m.subsystem(), "admin/");
        assert_eq!(m.remainder, "");
    }

    #[test]
    fn test_namespace_root() {
        let entry = SubsystemEntry::with_root("shop", "modules/shop");
        assert_eq!(entry.namespace_root(), PathBuf::from("modules/shop"));
        assert_eq!(
            SubsystemEntry::new("/admin/").namespace_root(),
            PathBuf::from("admin")
        );
    }
}
