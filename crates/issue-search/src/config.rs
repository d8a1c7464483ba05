//! Search configuration: alias table, status vocabulary and typed keys.
//!
//! The built-in configuration is available process-wide through
//! [`SearchConfig::builtin`]. Hosts that need different aliases or statuses
//! build their own [`SearchConfig`] once at startup, either in code or from a
//! TOML file, and share it read-only afterwards.
//!
//! # File format
//!
//! ```toml
//! version = 1
//!
//! [aliases]
//! owner = "assigned_to"
//!
//! [statuses]
//! open = "unresolved"
//! done = "resolved"
//!
//! [keys]
//! numeric = ["priority"]
//! date = ["resolved_at"]
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};
use crate::query::KeyAliases;
use crate::status::{GroupStatus, StatusVocabulary};

/// Current config file version.
pub const CONFIG_VERSION: u32 = 1;

const BUILTIN_NUMERIC_KEYS: &[&str] = &[
    "times_seen",
    "project_id",
    "issue.id",
    "stack.colno",
    "stack.lineno",
    "stack.stack_level",
];

const BUILTIN_DATE_KEYS: &[&str] = &[
    "first_seen",
    "last_seen",
    "active_at",
    "date",
    "timestamp",
    "start",
    "end",
];

static BUILTIN: LazyLock<SearchConfig> = LazyLock::new(SearchConfig::default);

/// How the value of a canonical key is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Plain string comparison; operator characters are literal.
    Text,
    /// Integer values with ordering operators.
    Numeric,
    /// Absolute or relative datetimes with ordering operators.
    Date,
}

/// Immutable configuration consulted by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    aliases: KeyAliases,
    statuses: StatusVocabulary,
    numeric_keys: BTreeSet<String>,
    date_keys: BTreeSet<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            aliases: KeyAliases::default(),
            statuses: StatusVocabulary::default(),
            numeric_keys: BUILTIN_NUMERIC_KEYS.iter().map(|k| k.to_string()).collect(),
            date_keys: BUILTIN_DATE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl SearchConfig {
    /// Returns the shared built-in configuration.
    pub fn builtin() -> &'static SearchConfig {
        &BUILTIN
    }

    /// Parses a TOML config document and applies it over the built-in configuration.
    pub fn from_toml_str(content: &str) -> SearchResult<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| SearchError::config(format!("failed to parse config: {}", e)))?;
        Self::from_file(file)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> SearchResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SearchError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded search config");
        Ok(config)
    }

    /// Applies a deserialized config file over the built-in configuration.
    pub fn from_file(file: ConfigFile) -> SearchResult<Self> {
        if file.version > CONFIG_VERSION {
            return Err(SearchError::config(format!(
                "unsupported config version {} (expected at most {})",
                file.version, CONFIG_VERSION
            )));
        }

        let mut config = Self::default();
        for (raw, canonical) in file.aliases {
            config = config.with_alias(raw, canonical)?;
        }
        if let Some(statuses) = file.statuses {
            config.statuses = StatusVocabulary::from_entries(statuses);
        }
        for key in file.keys.numeric {
            config = config.with_numeric_key(key)?;
        }
        for key in file.keys.date {
            config = config.with_date_key(key)?;
        }
        Ok(config)
    }

    /// Adds an alias. Both sides must be non-empty.
    pub fn with_alias(
        mut self,
        raw: impl Into<String>,
        canonical: impl Into<String>,
    ) -> SearchResult<Self> {
        let raw = raw.into();
        let canonical = canonical.into();
        if raw.is_empty() || canonical.is_empty() {
            return Err(SearchError::config(format!(
                "alias '{}' -> '{}' must name non-empty keys",
                raw, canonical
            )));
        }
        self.aliases.insert(raw, canonical);
        Ok(self)
    }

    /// Replaces the status vocabulary.
    pub fn with_statuses(mut self, statuses: StatusVocabulary) -> Self {
        self.statuses = statuses;
        self
    }

    /// Marks a canonical key as numeric.
    pub fn with_numeric_key(mut self, key: impl Into<String>) -> SearchResult<Self> {
        let key = non_empty_key(key.into())?;
        self.date_keys.remove(&key);
        self.numeric_keys.insert(key);
        Ok(self)
    }

    /// Marks a canonical key as a date.
    pub fn with_date_key(mut self, key: impl Into<String>) -> SearchResult<Self> {
        let key = non_empty_key(key.into())?;
        self.numeric_keys.remove(&key);
        self.date_keys.insert(key);
        Ok(self)
    }

    pub fn aliases(&self) -> &KeyAliases {
        &self.aliases
    }

    pub fn statuses(&self) -> &StatusVocabulary {
        &self.statuses
    }

    /// Resolves a raw key through the alias table.
    pub fn resolve_key<'a>(&'a self, raw: &'a str) -> &'a str {
        self.aliases.resolve(raw)
    }

    /// Returns how values of a canonical key are interpreted.
    pub fn key_type(&self, canonical: &str) -> KeyType {
        if self.numeric_keys.contains(canonical) {
            KeyType::Numeric
        } else if self.date_keys.contains(canonical) {
            KeyType::Date
        } else {
            KeyType::Text
        }
    }

    pub fn numeric_keys(&self) -> impl Iterator<Item = &str> {
        self.numeric_keys.iter().map(String::as_str)
    }

    pub fn date_keys(&self) -> impl Iterator<Item = &str> {
        self.date_keys.iter().map(String::as_str)
    }
}

fn non_empty_key(key: String) -> SearchResult<String> {
    if key.is_empty() {
        return Err(SearchError::config("typed key names must be non-empty"));
    }
    Ok(key)
}

/// On-disk configuration structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Config schema version. Defaults to the current version when absent.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Extra aliases merged over the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// Replacement status vocabulary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<BTreeMap<String, GroupStatus>>,

    /// Extra typed keys.
    #[serde(default)]
    pub keys: KeysConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            aliases: BTreeMap::new(),
            statuses: None,
            keys: KeysConfig::default(),
        }
    }
}

/// Typed key additions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_key_types() {
        let config = SearchConfig::builtin();
        assert_eq!(config.key_type("times_seen"), KeyType::Numeric);
        assert_eq!(config.key_type("first_seen"), KeyType::Date);
        assert_eq!(config.key_type("first_release"), KeyType::Text);
        assert_eq!(config.key_type("browser"), KeyType::Text);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = SearchConfig::builtin() as *const SearchConfig;
        let b = SearchConfig::builtin() as *const SearchConfig;
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_toml_merges_aliases() {
        let config = SearchConfig::from_toml_str(
            r#"
            [aliases]
            owner = "assigned_to"
            "#,
        )
        .unwrap();
        assert_eq!(config.resolve_key("owner"), "assigned_to");
        assert_eq!(config.resolve_key("bookmarks"), "bookmarked_by");
    }

    #[test]
    fn test_from_toml_replaces_statuses() {
        let config = SearchConfig::from_toml_str(
            r#"
            [statuses]
            open = "unresolved"
            done = "resolved"
            "#,
        )
        .unwrap();
        assert_eq!(config.statuses().len(), 2);
        assert_eq!(config.statuses().status("done"), Some(GroupStatus::Resolved));
        assert_eq!(config.statuses().status("resolved"), None);
    }

    #[test]
    fn test_from_toml_adds_typed_keys() {
        let config = SearchConfig::from_toml_str(
            r#"
            [keys]
            numeric = ["priority"]
            date = ["resolved_at", "times_seen"]
            "#,
        )
        .unwrap();
        assert_eq!(config.key_type("priority"), KeyType::Numeric);
        assert_eq!(config.key_type("resolved_at"), KeyType::Date);
        // Re-declaring moves the key between sets.
        assert_eq!(config.key_type("times_seen"), KeyType::Date);
    }

    #[test]
    fn test_from_toml_empty_document_is_builtin() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(&config, SearchConfig::builtin());
    }

    #[test]
    fn test_from_toml_rejects_future_version() {
        let err = SearchConfig::from_toml_str("version = 99").unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
        assert!(err.to_string().contains("unsupported config version 99"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_status() {
        let err = SearchConfig::from_toml_str(
            r#"
            [statuses]
            frozen = "frozen"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::Config { .. }));
    }

    #[test]
    fn test_from_toml_rejects_empty_alias_target() {
        let err = SearchConfig::from_toml_str(
            r#"
            [aliases]
            owner = ""
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[aliases]\nwho = \"assigned_to\"").unwrap();

        let config = SearchConfig::load(file.path()).unwrap();
        assert_eq!(config.resolve_key("who"), "assigned_to");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SearchConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
