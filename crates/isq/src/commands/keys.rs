//! Keys command implementation.
//!
//! Lists key aliases, typed keys and the keys whose values are converted.

use issue_search::{ConverterRegistry, SearchConfig};

use super::config::load_search_config;
use super::{CommandContext, Result};
use crate::output::{format_keys_json, format_keys_table};

/// Snapshot of the key tables in effect.
#[derive(Debug)]
pub struct KeysListing<'a> {
    /// `(raw, canonical)` alias pairs, sorted by raw key.
    pub aliases: Vec<(&'a str, &'a str)>,
    pub numeric: Vec<&'a str>,
    pub date: Vec<&'a str>,
    /// Keys with a registered value converter.
    pub converted: Vec<&'static str>,
}

impl<'a> KeysListing<'a> {
    /// Collects the key tables from a configuration.
    pub fn from_config(config: &'a SearchConfig) -> Self {
        Self {
            aliases: config.aliases().iter().collect(),
            numeric: config.numeric_keys().collect(),
            date: config.date_keys().collect(),
            converted: ConverterRegistry::builtin().keys().collect(),
        }
    }
}

/// Executes the keys command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = load_search_config(ctx)?;
    let listing = KeysListing::from_config(&config);

    if ctx.json_output {
        let output = format_keys_json(&listing)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_keys_table(&listing, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_from_builtin() {
        let listing = KeysListing::from_config(SearchConfig::builtin());
        assert!(listing.aliases.contains(&("bookmarks", "bookmarked_by")));
        assert!(listing.aliases.contains(&("first-release", "first_release")));
        assert!(listing.numeric.contains(&"times_seen"));
        assert!(listing.date.contains(&"last_seen"));
        assert_eq!(
            listing.converted,
            vec!["assigned_to", "bookmarked_by", "subscribed_by"]
        );
    }

    #[test]
    fn test_aliases_are_sorted() {
        let listing = KeysListing::from_config(SearchConfig::builtin());
        let raw: Vec<&str> = listing.aliases.iter().map(|(raw, _)| *raw).collect();
        let mut sorted = raw.clone();
        sorted.sort_unstable();
        assert_eq!(raw, sorted);
    }
}
