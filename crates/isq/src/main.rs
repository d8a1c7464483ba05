use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::parse::ParseOptions;
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{:#}", error_json);
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(cli: &Cli) {
    use tracing_subscriber::EnvFilter;

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Some(Commands::Parse {
            query,
            directory,
            user,
            projects,
            now,
        }) => {
            let opts = ParseOptions {
                query: query.clone(),
                directory: directory.clone(),
                user: user.clone(),
                projects: projects.clone(),
                now: *now,
            };
            commands::parse::execute(&ctx, &opts)
        }
        Some(Commands::Keys) => commands::keys::execute(&ctx),
        Some(Commands::Statuses) => commands::statuses::execute(&ctx),
        Some(Commands::Config { command }) => match command {
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Show) | None => commands::config::execute_show(&ctx),
        },
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell).map_err(CommandError::Io)
        }
        None => {
            if !ctx.quiet {
                println!("isq - issue search query inspector");
                println!("Use --help for usage information");
            }
            Ok(())
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Search(search) if search.is_invalid_query() => "INVALID_QUERY",
        CommandError::Search(_) | CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::NotFound(_) => "NOT_FOUND",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit status for an error: 2 for a rejected query, 1 otherwise.
fn exit_status(e: &CommandError) -> u8 {
    if e.is_invalid_query() {
        2
    } else {
        1
    }
}
