//! Issue status codes and the name vocabulary used by `is:` searches.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an issue group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Unresolved,
    Resolved,
    Ignored,
    PendingDeletion,
    DeletionInProgress,
    PendingMerge,
}

impl GroupStatus {
    /// All statuses, ordered by code.
    pub const ALL: [GroupStatus; 6] = [
        GroupStatus::Unresolved,
        GroupStatus::Resolved,
        GroupStatus::Ignored,
        GroupStatus::PendingDeletion,
        GroupStatus::DeletionInProgress,
        GroupStatus::PendingMerge,
    ];

    /// Returns the numeric code stored for this status.
    pub fn code(self) -> u8 {
        match self {
            GroupStatus::Unresolved => 0,
            GroupStatus::Resolved => 1,
            GroupStatus::Ignored => 2,
            GroupStatus::PendingDeletion => 3,
            GroupStatus::DeletionInProgress => 4,
            GroupStatus::PendingMerge => 5,
        }
    }

    /// Looks up a status by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Returns the snake_case identifier used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupStatus::Unresolved => "unresolved",
            GroupStatus::Resolved => "resolved",
            GroupStatus::Ignored => "ignored",
            GroupStatus::PendingDeletion => "pending_deletion",
            GroupStatus::DeletionInProgress => "deletion_in_progress",
            GroupStatus::PendingMerge => "pending_merge",
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bidirectional mapping between status names and [`GroupStatus`] values.
///
/// Several names may map to the same status (`muted` and `ignored`); reverse
/// lookup returns the first name registered for a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVocabulary {
    entries: Vec<(String, GroupStatus)>,
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        Self::from_entries([
            ("resolved", GroupStatus::Resolved),
            ("unresolved", GroupStatus::Unresolved),
            ("ignored", GroupStatus::Ignored),
            ("resolvedInNextRelease", GroupStatus::Unresolved),
            ("muted", GroupStatus::Ignored),
        ])
    }
}

impl StatusVocabulary {
    /// Builds a vocabulary from name/status pairs. Later duplicates of a name are ignored.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, GroupStatus)>,
        S: Into<String>,
    {
        let mut vocabulary = Self {
            entries: Vec::new(),
        };
        for (name, status) in entries {
            let name = name.into();
            if vocabulary.status(&name).is_none() {
                vocabulary.entries.push((name, status));
            }
        }
        vocabulary
    }

    /// Looks up the status for a name. Names are case-sensitive.
    pub fn status(&self, name: &str) -> Option<GroupStatus> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, status)| *status)
    }

    /// Returns the first name registered for a status.
    pub fn name(&self, status: GroupStatus) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| *entry == status)
            .map(|(name, _)| name.as_str())
    }

    /// Iterates over all name/status pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, GroupStatus)> {
        self.entries
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
    }

    /// Iterates over all registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
