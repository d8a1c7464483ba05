//! Issue search query parsing and value normalization.
//!
//! This crate turns a free-text issue search such as
//! `is:unassigned first-release:123 assigned:me` into an ordered list of typed
//! [`SearchFilter`]s ready for a query executor:
//!
//! 1. [`tokenize`] splits the text into free-text and `key:value` tokens.
//! 2. [`QueryParser`] resolves key aliases, expands `is:`/`has:` and builds
//!    filters in input order.
//! 3. [`ConverterRegistry`] resolves contextual values (`me`, `#team`,
//!    usernames) against a [`Directory`] for the acting identity.
//!
//! # Example
//!
//! ```
//! use issue_search::{
//!     convert_query_values, parse_search_query, MemoryDirectory, Project, RawValue, User,
//! };
//!
//! let filters = parse_search_query("is:unresolved assigned:me").unwrap();
//! assert_eq!(filters.len(), 2);
//!
//! let me = User::new(1, "alice");
//! let projects = vec![Project::new(1, "web", 1)];
//! let directory = MemoryDirectory::new();
//! let filters = convert_query_values(filters, &projects, Some(&me), &directory);
//! assert_eq!(filters[1].value().raw_value(), &RawValue::User(me));
//! ```

mod suggest;

pub mod config;
pub mod convert;
pub mod directory;
pub mod error;
pub mod models;
pub mod query;
pub mod status;

pub use config::{KeyType, SearchConfig};
pub use convert::{
    convert_actor_value, convert_query_values, convert_user_value, ConversionContext,
    ConverterRegistry, ValueConverter,
};
pub use directory::{Directory, MemoryDirectory};
pub use error::{SearchError, SearchResult};
pub use models::{Actor, Project, Team, User};
pub use query::{
    tokenize, QueryParser, RawValue, SearchFilter, SearchKey, SearchOperator, SearchValue,
};
pub use status::{GroupStatus, StatusVocabulary};

/// Parses a query with the built-in configuration.
///
/// # Errors
///
/// Returns `SearchError::InvalidSearchQuery` if the query is malformed.
pub fn parse_search_query(query: &str) -> SearchResult<Vec<SearchFilter>> {
    QueryParser::default().parse(query)
}

/// Resolves a raw key through the built-in alias table.
pub fn resolve_key(raw_key: &str) -> &str {
    SearchConfig::builtin().resolve_key(raw_key)
}
