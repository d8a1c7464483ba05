//! Config command implementation.
//!
//! Locates and shows the search configuration file.
//! Config file is located at ~/.config/isq/config.toml.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use issue_search::SearchConfig;

use super::{CommandContext, CommandError, Result};

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/isq/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            return Ok(PathBuf::from(xdg_config).join("isq"));
        }
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("isq"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path, preferring an explicit override.
pub fn get_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the search configuration, falling back to the built-in one when the
/// file does not exist.
pub fn load_search_config(ctx: &CommandContext) -> Result<SearchConfig> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using built-in configuration");
        return Ok(SearchConfig::default());
    }

    Ok(SearchConfig::load(&path)?)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let content = if path.exists() {
        let content = fs::read_to_string(&path)?;
        SearchConfig::from_toml_str(&content)?;
        Some(content)
    } else {
        None
    };

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": content.is_some(),
            "content": content,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", content.is_some());

        match content {
            Some(content) => print!("{}", content),
            None => println!("(No config file exists. The built-in configuration is used.)"),
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    fn context(config_path: Option<PathBuf>) -> CommandContext {
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
            config_path,
        }
    }

    #[test]
    fn test_override_path_wins() {
        let path = get_config_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    #[serial]
    fn test_xdg_config_home() {
        let original = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", "/tmp/isq-xdg-test");

        let path = get_config_path(None);

        match original {
            Some(val) => env::set_var("XDG_CONFIG_HOME", val),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        assert_eq!(
            path.unwrap(),
            PathBuf::from("/tmp/isq-xdg-test/isq/config.toml")
        );
    }

    #[test]
    #[serial]
    fn test_default_path_under_home() {
        let original = env::var("XDG_CONFIG_HOME").ok();
        env::remove_var("XDG_CONFIG_HOME");

        let path = get_config_path(None);

        if let Some(val) = original {
            env::set_var("XDG_CONFIG_HOME", val);
        }

        let path = path.unwrap();
        assert!(path.ends_with(".config/isq/config.toml"), "{}", path.display());
    }

    #[test]
    fn test_missing_file_is_builtin() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(Some(temp_dir.path().join("missing.toml")));
        let config = load_search_config(&ctx).unwrap();
        assert_eq!(&config, SearchConfig::builtin());
    }

    #[test]
    fn test_load_from_override() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, "[aliases]\nowner = \"assigned_to\"").unwrap();

        let config = load_search_config(&context(Some(config_path))).unwrap();
        assert_eq!(config.resolve_key("owner"), "assigned_to");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "version = \"one\"").unwrap();

        let err = load_search_config(&context(Some(config_path.clone()))).unwrap_err();
        assert!(matches!(err, CommandError::Search(_)));
        assert!(execute_show(&context(Some(config_path))).is_err());
    }
}
