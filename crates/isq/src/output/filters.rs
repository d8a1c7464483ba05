//! Parsed filter output formatting.

use issue_search::{RawValue, SearchFilter, SearchOperator};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_operator, format_value, truncate_str, value_type};

/// JSON output structure for the parse command.
#[derive(Serialize)]
pub struct ParseOutput<'a> {
    pub query: &'a str,
    pub converted: bool,
    pub filters: Vec<FilterOutput<'a>>,
}

/// JSON output structure for a single filter.
#[derive(Serialize)]
pub struct FilterOutput<'a> {
    pub key: &'a str,
    pub operator: SearchOperator,
    pub value: &'a RawValue,
    pub text: &'a str,
}

/// Formats parsed filters as JSON.
pub fn format_filters_json(
    query: &str,
    filters: &[SearchFilter],
    converted: bool,
) -> Result<String, serde_json::Error> {
    let output = ParseOutput {
        query,
        converted,
        filters: filters
            .iter()
            .map(|f| FilterOutput {
                key: f.key().name(),
                operator: f.operator(),
                value: f.value().raw_value(),
                text: f.value().text(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats parsed filters as a table.
pub fn format_filters_table(filters: &[SearchFilter], use_colors: bool) -> String {
    if filters.is_empty() {
        return "No filters (empty query).\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<20} {:<3} {:<9} {}", "Key", "Op", "Type", "Value");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for filter in filters {
        let key = format!("{:<20}", truncate_str(filter.key().name(), 20));
        let key = if use_colors {
            key.cyan().to_string()
        } else {
            key
        };
        let raw = filter.value().raw_value();
        let line = format!(
            "{} {:<3} {:<9} {}",
            key,
            format_operator(filter.operator(), use_colors),
            value_type(raw),
            format_value(raw, filter.value().text(), use_colors)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use issue_search::parse_search_query;

    #[test]
    fn test_format_filters_json() {
        let filters = parse_search_query("is:resolved times_seen:>10").unwrap();
        let json = format_filters_json("is:resolved times_seen:>10", &filters, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["query"], "is:resolved times_seen:>10");
        assert_eq!(value["converted"], false);
        assert_eq!(value["filters"][0]["key"], "status");
        assert_eq!(value["filters"][0]["operator"], "=");
        assert_eq!(value["filters"][0]["value"]["type"], "status");
        assert_eq!(value["filters"][0]["value"]["value"], "resolved");
        assert_eq!(value["filters"][1]["operator"], ">");
        assert_eq!(value["filters"][1]["value"]["value"], 10);
        assert_eq!(value["filters"][1]["text"], ">10");
    }

    #[test]
    fn test_format_filters_table() {
        let filters = parse_search_query("!is:unassigned release:1.0").unwrap();
        let table = format_filters_table(&filters, false);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Key"));
        assert!(lines[1].starts_with("unassigned"));
        assert!(lines[1].contains("!="));
        assert!(lines[1].contains("bool"));
        assert!(lines[2].contains("\"1.0\""));
    }

    #[test]
    fn test_format_filters_table_empty() {
        assert_eq!(format_filters_table(&[], false), "No filters (empty query).\n");
    }
}
