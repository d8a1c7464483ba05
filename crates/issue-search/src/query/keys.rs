//! Key alias resolution.

use std::collections::BTreeMap;

/// Built-in aliases, as `(raw key, canonical key)` pairs.
///
/// Every target is a plain text key, so `alias:value` always yields a single
/// `canonical = "value"` filter. Typed keys are written by their canonical name.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("assigned", "assigned_to"),
    ("bookmarks", "bookmarked_by"),
    ("subscribed", "subscribed_by"),
    ("first-release", "first_release"),
    ("firstRelease", "first_release"),
    ("dist", "release.dist"),
];

/// Read-only mapping from user-facing key spellings to canonical field names.
///
/// Resolution is total: a key without an alias resolves to itself, so custom
/// attribute filters (`browser:firefox`) pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAliases {
    aliases: BTreeMap<String, String>,
}

impl Default for KeyAliases {
    fn default() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }
}

impl KeyAliases {
    /// Creates an empty alias table.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Adds or replaces an alias.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(raw.into(), canonical.into());
    }

    /// Resolves a raw key to its canonical name. Case-sensitive.
    pub fn resolve<'a>(&'a self, raw: &'a str) -> &'a str {
        self.aliases.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Returns true if the raw key has an alias.
    pub fn contains(&self, raw: &str) -> bool {
        self.aliases.contains_key(raw)
    }

    /// Iterates over `(raw, canonical)` pairs sorted by raw key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(raw, canonical)| (raw.as_str(), canonical.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_builtin_aliases() {
        let aliases = KeyAliases::default();
        assert_eq!(aliases.resolve("bookmarks"), "bookmarked_by");
        assert_eq!(aliases.resolve("first-release"), "first_release");
        assert_eq!(aliases.resolve("firstRelease"), "first_release");
        assert_eq!(aliases.resolve("assigned"), "assigned_to");
        assert_eq!(aliases.resolve("dist"), "release.dist");
    }

    #[test]
    fn test_resolve_passes_unknown_keys_through() {
        let aliases = KeyAliases::default();
        assert_eq!(aliases.resolve("non_mapped"), "non_mapped");
        assert_eq!(aliases.resolve("first_release"), "first_release");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let aliases = KeyAliases::default();
        assert_eq!(aliases.resolve("Bookmarks"), "Bookmarks");
        assert_eq!(aliases.resolve("FIRSTSEEN"), "FIRSTSEEN");
    }

    #[test]
    fn test_insert_overrides_builtin() {
        let mut aliases = KeyAliases::default();
        aliases.insert("assigned", "owner");
        aliases.insert("owner_of", "assigned_to");
        assert_eq!(aliases.resolve("assigned"), "owner");
        assert_eq!(aliases.resolve("owner_of"), "assigned_to");
        assert!(aliases.contains("owner_of"));
    }

    #[test]
    fn test_empty_table_is_identity() {
        let aliases = KeyAliases::empty();
        assert!(aliases.is_empty());
        assert_eq!(aliases.resolve("bookmarks"), "bookmarks");
    }
}
