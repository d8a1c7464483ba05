//! Expansion of the `is:` and `has:` pseudo-keys.

use crate::error::{SearchError, SearchResult};
use crate::status::StatusVocabulary;
use crate::suggest::closest_name;

use super::filter::{RawValue, SearchFilter, SearchKey, SearchOperator, SearchValue};

/// Canonical key produced by `is:assigned` / `is:unassigned`.
pub const UNASSIGNED_KEY: &str = "unassigned";

/// Canonical key produced by `is:<status>`.
pub const STATUS_KEY: &str = "status";

/// Expands `is:<value>` into a single canonical filter.
///
/// Negation flips the operator and never the value: `!is:unassigned` is
/// `unassigned != true`, not `unassigned = false`.
///
/// # Errors
///
/// Returns `SearchError::InvalidSearchQuery` listing every accepted value when
/// `value` is neither an assignment state nor a known status name.
pub fn expand_is(
    value: &str,
    negated: bool,
    statuses: &StatusVocabulary,
) -> SearchResult<SearchFilter> {
    let (key, raw) = match value {
        "unassigned" => (UNASSIGNED_KEY, RawValue::Bool(true)),
        "assigned" => (UNASSIGNED_KEY, RawValue::Bool(false)),
        _ => match statuses.status(value) {
            Some(status) => (STATUS_KEY, RawValue::Status(status)),
            None => return Err(invalid_is_value(value, statuses)),
        },
    };

    Ok(SearchFilter::new(
        SearchKey::new(key),
        SearchOperator::equality(negated),
        SearchValue::with_text(raw, value),
    ))
}

/// Returns every value accepted by `is:`, sorted.
pub fn valid_is_values(statuses: &StatusVocabulary) -> Vec<&str> {
    let mut values: Vec<&str> = ["assigned", "unassigned"]
        .into_iter()
        .chain(statuses.names())
        .collect();
    values.sort_unstable();
    values.dedup();
    values
}

fn invalid_is_value(value: &str, statuses: &StatusVocabulary) -> SearchError {
    let valid = valid_is_values(statuses);
    let mut message = format!(
        "Invalid value for \"is\" search, valid values are [{}] (got \"{}\").",
        valid.join(", "),
        value
    );
    if let Some(suggestion) = closest_name(value, valid.iter().copied()) {
        message.push_str(&format!(" Did you mean \"{}\"?", suggestion));
    }
    SearchError::invalid_query(message)
}

/// Expands `has:<key>` into a presence check on the canonical key.
///
/// `has:K` is `K != ""`; `!has:K` is `K = ""`.
pub fn expand_has(canonical_key: &str, negated: bool) -> SearchResult<SearchFilter> {
    if canonical_key.is_empty() {
        return Err(SearchError::invalid_query(
            "Invalid value for \"has\" search, a key name is required",
        ));
    }

    Ok(SearchFilter::new(
        SearchKey::new(canonical_key),
        SearchOperator::equality(!negated),
        SearchValue::with_text("", ""),
    ))
}
