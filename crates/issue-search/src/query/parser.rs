//! Filter builder: turns query tokens into an ordered list of filters.

use chrono::{DateTime, Utc};

use crate::config::{KeyType, SearchConfig};
use crate::error::{SearchError, SearchResult};

use super::filter::{RawValue, SearchFilter, SearchKey, SearchOperator, SearchValue};
use super::lexer::{tokenize, PositionedToken, QueryToken};
use super::special::{expand_has, expand_is};
use super::values::{parse_absolute_time, parse_integer, parse_relative_time, RelativeDirection};

/// Key that free text is collected under.
pub const MESSAGE_KEY: &str = "message";

/// Parser for issue search queries.
///
/// Each term of the query becomes one filter (two for a bare date on a date
/// key), in the order the terms were written:
///
/// ```text
/// query  ::= term*
/// term   ::= text | filter
/// filter ::= "!"? key ":" value
/// value  ::= '"' chars '"' | non-whitespace+
/// ```
///
/// - `is:<value>` expands to an assignment or status filter.
/// - `has:<key>` checks that a key is set.
/// - Other keys are resolved through the alias table; numeric and date keys
///   additionally accept `>`, `>=`, `<`, `<=` prefixes.
/// - Runs of adjacent free-text terms are joined into one `message` filter.
///
/// # Example
///
/// ```
/// use issue_search::{QueryParser, SearchConfig, SearchOperator};
///
/// let parser = QueryParser::new(SearchConfig::builtin());
/// let filters = parser.parse("is:unassigned first-release:123").unwrap();
/// assert_eq!(filters[0].key().name(), "unassigned");
/// assert_eq!(filters[1].key().name(), "first_release");
/// assert_eq!(filters[1].operator(), SearchOperator::Eq);
/// ```
#[derive(Debug, Clone)]
pub struct QueryParser<'a> {
    config: &'a SearchConfig,
    now: DateTime<Utc>,
}

impl Default for QueryParser<'static> {
    fn default() -> Self {
        Self::new(SearchConfig::builtin())
    }
}

impl<'a> QueryParser<'a> {
    /// Creates a parser using the given configuration and the current time.
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            now: Utc::now(),
        }
    }

    /// Sets the reference time for relative date values such as `first_seen:-24h`.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        self.config
    }

    /// Parses a query string into filters.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidSearchQuery` on the first structural
    /// problem: an unterminated quote, an unknown `is:` value, or a malformed
    /// value after an ordering operator. No partial list is returned.
    pub fn parse(&self, query: &str) -> SearchResult<Vec<SearchFilter>> {
        let tokens = tokenize(query)?;
        let result = self.build(tokens);
        match &result {
            Ok(filters) => tracing::debug!(query, filters = filters.len(), "parsed search query"),
            Err(e) => tracing::debug!(query, error = %e, "rejected search query"),
        }
        result
    }

    /// Builds filters from already tokenized input.
    pub fn build(&self, tokens: Vec<PositionedToken>) -> SearchResult<Vec<SearchFilter>> {
        let mut filters = Vec::with_capacity(tokens.len());
        let mut free_text: Vec<String> = Vec::new();

        for positioned in tokens {
            match positioned.token {
                QueryToken::Text { value, .. } => free_text.push(value),
                QueryToken::Filter {
                    negated,
                    key,
                    value,
                    ..
                } => {
                    flush_free_text(&mut free_text, &mut filters);
                    self.build_filter(negated, &key, &value, &mut filters)?;
                }
            }
        }
        flush_free_text(&mut free_text, &mut filters);

        Ok(filters)
    }

    fn build_filter(
        &self,
        negated: bool,
        raw_key: &str,
        value: &str,
        filters: &mut Vec<SearchFilter>,
    ) -> SearchResult<()> {
        match raw_key {
            "is" => filters.push(expand_is(value, negated, self.config.statuses())?),
            "has" => filters.push(expand_has(self.config.resolve_key(value), negated)?),
            _ => {
                let key = self.config.resolve_key(raw_key);
                match self.config.key_type(key) {
                    KeyType::Text => filters.push(text_filter(key, negated, value)),
                    KeyType::Numeric => filters.push(numeric_filter(key, negated, value)?),
                    KeyType::Date => self.push_date_filters(key, negated, value, filters)?,
                }
            }
        }
        Ok(())
    }

    fn push_date_filters(
        &self,
        key: &str,
        negated: bool,
        value: &str,
        filters: &mut Vec<SearchFilter>,
    ) -> SearchResult<()> {
        let invalid = || {
            SearchError::invalid_query(format!(
                "Invalid format for date search: \"{}:{}\"",
                key, value
            ))
        };

        if let (Some(operator), rest) = SearchOperator::strip_ordering_prefix(value) {
            let time = parse_absolute_time(rest).ok_or_else(invalid)?;
            filters.push(typed_filter(key, operator, negated, time.instant(), value));
            return Ok(());
        }

        if let Some((direction, delta)) = parse_relative_time(value) {
            let threshold = self.now.checked_sub_signed(delta).ok_or_else(invalid)?;
            let operator = match direction {
                RelativeDirection::Within => SearchOperator::Ge,
                RelativeDirection::OlderThan => SearchOperator::Le,
            };
            filters.push(typed_filter(key, operator, negated, threshold, value));
            return Ok(());
        }

        let Some(time) = parse_absolute_time(value) else {
            filters.push(text_filter(key, negated, value));
            return Ok(());
        };

        if negated {
            return Err(SearchError::invalid_query(format!(
                "Negation is not supported for date ranges: \"!{}:{}\"",
                key, value
            )));
        }
        let (start, end) = time.range().ok_or_else(invalid)?;
        filters.push(typed_filter(key, SearchOperator::Ge, false, start, value));
        filters.push(typed_filter(key, SearchOperator::Lt, false, end, value));
        Ok(())
    }
}

fn flush_free_text(free_text: &mut Vec<String>, filters: &mut Vec<SearchFilter>) {
    if free_text.is_empty() {
        return;
    }
    let text = free_text.join(" ");
    free_text.clear();
    filters.push(text_filter(MESSAGE_KEY, false, &text));
}

fn text_filter(key: &str, negated: bool, value: &str) -> SearchFilter {
    SearchFilter::new(
        SearchKey::new(key),
        SearchOperator::equality(negated),
        SearchValue::with_text(value, value),
    )
}

fn typed_filter(
    key: &str,
    operator: SearchOperator,
    negated: bool,
    raw: impl Into<RawValue>,
    text: &str,
) -> SearchFilter {
    let operator = if negated { operator.negate() } else { operator };
    SearchFilter::new(SearchKey::new(key), operator, SearchValue::with_text(raw, text))
}

fn numeric_filter(key: &str, negated: bool, value: &str) -> SearchResult<SearchFilter> {
    match SearchOperator::strip_ordering_prefix(value) {
        (Some(operator), rest) => {
            let number = parse_integer(rest).ok_or_else(|| {
                SearchError::invalid_query(format!(
                    "Invalid format for numeric search: \"{}:{}\"",
                    key, value
                ))
            })?;
            Ok(typed_filter(key, operator, negated, number, value))
        }
        (None, _) => Ok(match parse_integer(value) {
            Some(number) => typed_filter(key, SearchOperator::Eq, negated, number, value),
            None => text_filter(key, negated, value),
        }),
    }
}
