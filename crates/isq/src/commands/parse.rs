//! Parse command implementation.
//!
//! Parses a query with the active configuration and, when a directory
//! snapshot is given, resolves user and team values for the acting user.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use issue_search::{
    convert_query_values, MemoryDirectory, Project, QueryParser, SearchConfig, SearchFilter, User,
};

use super::config::load_search_config;
use super::{CommandContext, CommandError, Result};
use crate::output::{format_filters_json, format_filters_table};

/// Options for the parse command.
#[derive(Debug, Default)]
pub struct ParseOptions {
    /// Query text.
    pub query: String,
    /// Directory snapshot for value conversion.
    pub directory: Option<PathBuf>,
    /// Acting username.
    pub user: Option<String>,
    /// Project slugs or IDs; empty means every project in the directory.
    pub projects: Vec<String>,
    /// Reference time for relative dates.
    pub now: Option<DateTime<Utc>>,
}

/// Result of parsing (and optionally converting) a query.
#[derive(Debug)]
pub struct ParseResult {
    /// The filters in query order.
    pub filters: Vec<SearchFilter>,
    /// Whether values were converted against a directory.
    pub converted: bool,
}

/// Executes the parse command.
///
/// # Errors
///
/// Returns an error if the query is invalid, the config or directory cannot
/// be loaded, or a named user or project does not exist.
pub fn execute(ctx: &CommandContext, opts: &ParseOptions) -> Result<()> {
    let config = load_search_config(ctx)?;
    let result = parse_query(&config, opts)?;

    if ctx.verbose {
        eprintln!(
            "Parsed {} filter(s){}",
            result.filters.len(),
            if result.converted { ", values converted" } else { "" }
        );
    }

    if ctx.json_output {
        let output = format_filters_json(&opts.query, &result.filters, result.converted)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_filters_table(&result.filters, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Parses the query and converts values when a directory is configured.
pub fn parse_query(config: &SearchConfig, opts: &ParseOptions) -> Result<ParseResult> {
    let mut parser = QueryParser::new(config);
    if let Some(now) = opts.now {
        parser = parser.with_now(now);
    }
    let filters = parser.parse(&opts.query)?;

    let Some(path) = &opts.directory else {
        return Ok(ParseResult {
            filters,
            converted: false,
        });
    };

    let directory = MemoryDirectory::load(path)?;
    let projects = resolve_projects(&directory, &opts.projects)?;
    let user = resolve_user(&directory, opts.user.as_deref())?;

    Ok(ParseResult {
        filters: convert_query_values(filters, &projects, user.as_ref(), &directory),
        converted: true,
    })
}

/// Resolves project arguments against the directory.
fn resolve_projects(directory: &MemoryDirectory, names: &[String]) -> Result<Vec<Project>> {
    if names.is_empty() {
        return Ok(directory.projects().to_vec());
    }

    names
        .iter()
        .map(|name| {
            directory
                .find_project(name)
                .cloned()
                .ok_or_else(|| CommandError::NotFound(format!("project '{}'", name)))
        })
        .collect()
}

fn resolve_user(directory: &MemoryDirectory, name: Option<&str>) -> Result<Option<User>> {
    name.map(|name| {
        directory
            .find_user(name)
            .cloned()
            .ok_or_else(|| CommandError::NotFound(format!("user '{}'", name)))
    })
    .transpose()
}
