//! Output formatting utilities for the isq CLI.
//!
//! This module provides functions for formatting data as tables or JSON:
//!
//! - [`filters`] - Parsed filter output (parse)
//! - [`vocabulary`] - Key and status tables (keys, statuses)
//! - [`helpers`] - Common formatting utilities

mod filters;
pub mod helpers;
mod vocabulary;

pub use filters::{format_filters_json, format_filters_table};
pub use vocabulary::{
    format_keys_json, format_keys_table, format_statuses_json, format_statuses_table,
};
