//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the isq CLI.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

/// isq - Parse and inspect issue search queries
#[derive(Parser, Debug)]
#[command(name = "isq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the search config file
    #[arg(long, global = true, env = "ISQ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a search query into filters
    #[command(alias = "p")]
    Parse {
        /// Query text (e.g., "is:unresolved assigned:me")
        query: String,

        /// JSON directory snapshot used to resolve users and teams
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Username of the acting user (resolves "me")
        #[arg(short, long, requires = "directory")]
        user: Option<String>,

        /// Project slug or ID to scope lookups to (repeatable, default: all)
        #[arg(short, long = "project", requires = "directory", action = clap::ArgAction::Append)]
        projects: Vec<String>,

        /// Reference time for relative dates (RFC 3339, default: now)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// List key aliases, typed keys and convertible keys
    Keys,

    /// List the status vocabulary accepted by "is:"
    Statuses,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,
}
