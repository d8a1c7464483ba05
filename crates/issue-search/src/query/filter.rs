//! Filter records produced by the parser.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Actor, Team, User};
use crate::status::GroupStatus;

/// Canonical field name a filter is expressed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchKey {
    name: String,
}

impl SearchKey {
    /// Creates a key from a canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl SearchOperator {
    /// Returns `=` or `!=` depending on negation.
    pub fn equality(negated: bool) -> Self {
        if negated {
            SearchOperator::Ne
        } else {
            SearchOperator::Eq
        }
    }

    /// Returns the logical complement of this operator.
    pub fn negate(self) -> Self {
        match self {
            SearchOperator::Eq => SearchOperator::Ne,
            SearchOperator::Ne => SearchOperator::Eq,
            SearchOperator::Gt => SearchOperator::Le,
            SearchOperator::Le => SearchOperator::Gt,
            SearchOperator::Lt => SearchOperator::Ge,
            SearchOperator::Ge => SearchOperator::Lt,
        }
    }

    /// Returns true for `>`, `>=`, `<` and `<=`.
    pub fn is_ordering(self) -> bool {
        !matches!(self, SearchOperator::Eq | SearchOperator::Ne)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchOperator::Eq => "=",
            SearchOperator::Ne => "!=",
            SearchOperator::Gt => ">",
            SearchOperator::Ge => ">=",
            SearchOperator::Lt => "<",
            SearchOperator::Le => "<=",
        }
    }

    /// Splits a leading ordering operator off a value.
    ///
    /// Two-character operators are tried first so `>=5` is not read as `>` `=5`.
    pub fn strip_ordering_prefix(value: &str) -> (Option<Self>, &str) {
        const PREFIXES: [(&str, SearchOperator); 4] = [
            (">=", SearchOperator::Ge),
            ("<=", SearchOperator::Le),
            (">", SearchOperator::Gt),
            ("<", SearchOperator::Lt),
        ];
        for (prefix, operator) in PREFIXES {
            if let Some(rest) = value.strip_prefix(prefix) {
                return (Some(operator), rest);
            }
        }
        (None, value)
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The comparable value of a filter.
///
/// The variant is fixed by the rule that produced the filter: `is:assigned`
/// yields [`RawValue::Bool`], `is:<status>` yields [`RawValue::Status`], typed
/// keys yield [`RawValue::Int`] or [`RawValue::DateTime`], and everything else
/// starts as [`RawValue::Text`]. Value converters replace text with resolved
/// [`RawValue::User`] or [`RawValue::Team`] records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RawValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Status(GroupStatus),
    DateTime(DateTime<Utc>),
    User(User),
    Team(Team),
}

impl RawValue {
    /// Returns the string if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the resolved identity id for user and team values.
    pub fn identity_id(&self) -> Option<u64> {
        match self {
            RawValue::User(user) => Some(user.id),
            RawValue::Team(team) => Some(team.id),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(text) => f.write_str(text),
            RawValue::Bool(value) => write!(f, "{}", value),
            RawValue::Int(value) => write!(f, "{}", value),
            RawValue::Status(status) => write!(f, "{}", status),
            RawValue::DateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            RawValue::User(user) => write!(f, "user:{}", user.id),
            RawValue::Team(team) => write!(f, "team:{}", team.id),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<GroupStatus> for RawValue {
    fn from(value: GroupStatus) -> Self {
        RawValue::Status(value)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        RawValue::DateTime(value)
    }
}

impl From<User> for RawValue {
    fn from(value: User) -> Self {
        RawValue::User(value)
    }
}

impl From<Team> for RawValue {
    fn from(value: Team) -> Self {
        RawValue::Team(value)
    }
}

impl From<Actor> for RawValue {
    fn from(value: Actor) -> Self {
        match value {
            Actor::User(user) => RawValue::User(user),
            Actor::Team(team) => RawValue::Team(team),
        }
    }
}

/// A raw value plus the literal query text it came from.
///
/// The text is kept for display and auditing only; two values are equal when
/// their raw values are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchValue {
    raw_value: RawValue,
    text: String,
}

impl SearchValue {
    /// Creates a value whose display text is the raw value's own rendering.
    pub fn new(raw_value: impl Into<RawValue>) -> Self {
        let raw_value = raw_value.into();
        let text = raw_value.to_string();
        Self { raw_value, text }
    }

    /// Creates a value with explicit display text.
    pub fn with_text(raw_value: impl Into<RawValue>, text: impl Into<String>) -> Self {
        Self {
            raw_value: raw_value.into(),
            text: text.into(),
        }
    }

    pub fn raw_value(&self) -> &RawValue {
        &self.raw_value
    }

    /// The literal query text this value was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns a copy with the raw value replaced and the text preserved.
    pub fn replace_raw(&self, raw_value: impl Into<RawValue>) -> Self {
        Self {
            raw_value: raw_value.into(),
            text: self.text.clone(),
        }
    }
}

impl PartialEq for SearchValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw_value == other.raw_value
    }
}

impl Eq for SearchValue {}

/// An immutable `(key, operator, value)` predicate.
///
/// Filter lists are ordered as the terms appeared in the query and are
/// conjunctive; the same key may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    key: SearchKey,
    operator: SearchOperator,
    value: SearchValue,
}

impl SearchFilter {
    pub fn new(key: SearchKey, operator: SearchOperator, value: SearchValue) -> Self {
        Self {
            key,
            operator,
            value,
        }
    }

    pub fn key(&self) -> &SearchKey {
        &self.key
    }

    pub fn operator(&self) -> SearchOperator {
        self.operator
    }

    pub fn value(&self) -> &SearchValue {
        &self.value
    }

    /// Returns a new filter with the value replaced.
    pub fn with_value(self, value: SearchValue) -> Self {
        Self { value, ..self }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator, self.value.text)
    }
}
