//! Search query parsing.
//!
//! Turns free-text queries into ordered, typed filter lists.
//!
//! # Supported Syntax
//!
//! ## Filters
//! - `key:value` - Equality filter; `!key:value` negates it
//! - `key:"quoted value"` - Values may contain whitespace and colons
//! - Aliased keys resolve to canonical names (`bookmarks` → `bookmarked_by`)
//! - Unknown keys pass through as free-form attribute filters
//!
//! ## Pseudo-keys
//! - `is:assigned`, `is:unassigned` - Assignment state
//! - `is:<status>` - Status (`resolved`, `unresolved`, `ignored`, ...)
//! - `has:<key>` - The key has a non-empty value
//!
//! ## Typed keys
//! - `times_seen:>10` - Numeric comparison (`>`, `>=`, `<`, `<=`)
//! - `first_seen:>2018-01-01` - Date comparison
//! - `first_seen:-24h` - Relative time (`w`, `d`, `h`, `m`)
//! - `last_seen:2018-01-01` - Whole-day range
//!
//! ## Free text
//! - Other words and `"quoted phrases"` become `message` filters

mod filter;
mod keys;
mod lexer;
mod parser;
mod special;
mod values;

pub use filter::{RawValue, SearchFilter, SearchKey, SearchOperator, SearchValue};
pub use keys::KeyAliases;
pub use lexer::{tokenize, Lexer, LexerError, LexerErrorKind, PositionedToken, QueryToken};
pub use parser::{QueryParser, MESSAGE_KEY};
pub use special::{expand_has, expand_is, valid_is_values, STATUS_KEY, UNASSIGNED_KEY};
