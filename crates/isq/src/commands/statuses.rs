//! Statuses command implementation.

use super::config::load_search_config;
use super::{CommandContext, Result};
use crate::output::{format_statuses_json, format_statuses_table};

/// Executes the statuses command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let config = load_search_config(ctx)?;
    let statuses = config.statuses();

    if ctx.json_output {
        let output = format_statuses_json(statuses)?;
        println!("{output}");
    } else if !ctx.quiet {
        let output = format_statuses_table(statuses, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}
