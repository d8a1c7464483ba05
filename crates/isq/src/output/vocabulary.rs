//! Key and status table formatting.

use issue_search::{GroupStatus, StatusVocabulary};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::keys::KeysListing;

/// JSON output structure for the keys command.
#[derive(Serialize)]
pub struct KeysOutput<'a> {
    pub aliases: Vec<AliasOutput<'a>>,
    pub numeric: &'a [&'a str],
    pub date: &'a [&'a str],
    pub converted: &'a [&'static str],
}

/// JSON output structure for one alias.
#[derive(Serialize)]
pub struct AliasOutput<'a> {
    pub key: &'a str,
    pub canonical: &'a str,
}

/// JSON output structure for one status name.
#[derive(Serialize)]
pub struct StatusOutput<'a> {
    pub name: &'a str,
    pub status: GroupStatus,
    pub code: u8,
}

/// Formats the key tables as JSON.
pub fn format_keys_json(listing: &KeysListing<'_>) -> Result<String, serde_json::Error> {
    let output = KeysOutput {
        aliases: listing
            .aliases
            .iter()
            .map(|&(key, canonical)| AliasOutput { key, canonical })
            .collect(),
        numeric: &listing.numeric,
        date: &listing.date,
        converted: &listing.converted,
    };

    serde_json::to_string_pretty(&output)
}

fn section_header(title: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", title.green().bold())
    } else {
        format!("{title}\n")
    }
}

/// Formats the key tables for the terminal.
pub fn format_keys_table(listing: &KeysListing<'_>, use_colors: bool) -> String {
    let mut output = section_header("Aliases", use_colors);
    for (key, canonical) in &listing.aliases {
        output.push_str(&format!("  {:<18} -> {}\n", key, canonical));
    }

    output.push('\n');
    output.push_str(&section_header("Numeric keys", use_colors));
    output.push_str(&format!("  {}\n", listing.numeric.join(", ")));

    output.push('\n');
    output.push_str(&section_header("Date keys", use_colors));
    output.push_str(&format!("  {}\n", listing.date.join(", ")));

    output.push('\n');
    output.push_str(&section_header("Converted keys", use_colors));
    output.push_str(&format!("  {}\n", listing.converted.join(", ")));

    output
}

/// Formats the status vocabulary as JSON.
pub fn format_statuses_json(statuses: &StatusVocabulary) -> Result<String, serde_json::Error> {
    let output: Vec<StatusOutput> = statuses
        .iter()
        .map(|(name, status)| StatusOutput {
            name,
            status,
            code: status.code(),
        })
        .collect();

    serde_json::to_string_pretty(&serde_json::json!({ "statuses": output }))
}

/// Formats the status vocabulary as a table.
pub fn format_statuses_table(statuses: &StatusVocabulary, use_colors: bool) -> String {
    if statuses.is_empty() {
        return "No statuses configured.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<24} {:<28} {}", "Name", "Status", "Code");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (name, status) in statuses.iter() {
        let line = format!("{:<24} {:<28} {}", name, status.as_str(), status.code());
        output.push_str(&line);
        output.push('\n');
    }

    output
}
