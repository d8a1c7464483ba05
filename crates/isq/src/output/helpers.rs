//! Common helper functions for output formatting.

use issue_search::{RawValue, SearchOperator};
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Returns the type tag shown for a raw value.
pub fn value_type(value: &RawValue) -> &'static str {
    match value {
        RawValue::Text(_) => "text",
        RawValue::Bool(_) => "bool",
        RawValue::Int(_) => "int",
        RawValue::Status(_) => "status",
        RawValue::DateTime(_) => "datetime",
        RawValue::User(_) => "user",
        RawValue::Team(_) => "team",
    }
}

/// Formats an operator for display, highlighting negations.
pub fn format_operator(operator: SearchOperator, use_colors: bool) -> String {
    let label = operator.as_str();
    if !use_colors {
        return label.to_string();
    }
    match operator {
        SearchOperator::Ne => label.red().to_string(),
        SearchOperator::Eq => label.to_string(),
        _ => label.yellow().to_string(),
    }
}

/// Formats a resolved value, dimming sentinel identities.
pub fn format_value(value: &RawValue, text: &str, use_colors: bool) -> String {
    let shown = match value {
        RawValue::Text(s) => format!("\"{}\"", truncate_str(s, 40)),
        RawValue::User(user) if !user.is_sentinel() => {
            format!("{} ({})", value, user.username)
        }
        RawValue::Team(team) if !team.is_sentinel() => format!("{} (#{})", value, team.slug),
        RawValue::User(_) | RawValue::Team(_) => format!("{} (no match for \"{}\")", value, text),
        _ => value.to_string(),
    };

    let sentinel = value.identity_id() == Some(0);
    if use_colors && sentinel {
        shown.dimmed().to_string()
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issue_search::{Team, User};

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate_str("ééééé", 4), "é...");
    }

    #[test]
    fn test_value_type() {
        assert_eq!(value_type(&RawValue::from("x")), "text");
        assert_eq!(value_type(&RawValue::Int(1)), "int");
        assert_eq!(value_type(&RawValue::from(User::sentinel())), "user");
    }

    #[test]
    fn test_format_operator_plain() {
        assert_eq!(format_operator(SearchOperator::Ge, false), ">=");
        assert_eq!(format_operator(SearchOperator::Ne, false), "!=");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&RawValue::from("me"), "me", false), "\"me\"");
        assert_eq!(
            format_value(&RawValue::from(User::new(3, "bob")), "bob", false),
            "user:3 (bob)"
        );
        assert_eq!(
            format_value(&RawValue::from(Team::new(4, "ops", 1)), "#ops", false),
            "team:4 (#ops)"
        );
        assert_eq!(
            format_value(&RawValue::from(User::sentinel()), "ghost", false),
            "user:0 (no match for \"ghost\")"
        );
    }
}
