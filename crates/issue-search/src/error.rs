//! Error types for the issue search parser.

use thiserror::Error;

/// A specialized Result type for search query operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while parsing a search query or loading its configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The query is structurally malformed or uses an invalid value.
    ///
    /// This is the only parse failure surfaced to callers; unknown users and
    /// teams resolve to sentinel values instead.
    #[error("{message}")]
    InvalidSearchQuery {
        /// Human-readable description of the problem.
        message: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid search configuration: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

impl SearchError {
    /// Creates an invalid query error.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        SearchError::InvalidSearchQuery {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        SearchError::Config {
            message: message.into(),
        }
    }

    /// Returns true if this error was caused by the query text itself.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, SearchError::InvalidSearchQuery { .. })
    }

    /// Returns the message carried by this error without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            SearchError::InvalidSearchQuery { message } | SearchError::Config { message } => {
                message
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_displays_bare_message() {
        let error = SearchError::invalid_query("Invalid value for \"is\" search");
        assert_eq!(error.to_string(), "Invalid value for \"is\" search");
        assert!(error.is_invalid_query());
    }

    #[test]
    fn test_config_error_display() {
        let error = SearchError::config("unknown status 'frozen'");
        assert_eq!(
            error.to_string(),
            "invalid search configuration: unknown status 'frozen'"
        );
        assert!(!error.is_invalid_query());
        assert_eq!(error.message(), "unknown status 'frozen'");
    }
}
