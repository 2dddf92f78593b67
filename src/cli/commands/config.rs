//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, InitOutcome};
use crate::error::{BuildInfoError, BuildInfoResult};
use console::style;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> BuildInfoResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> BuildInfoResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(manager: &ConfigManager, force: bool) -> BuildInfoResult<()> {
    let path = manager.path().display();
    match manager.init(force).await? {
        InitOutcome::Kept => println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("[WARN]").yellow(),
            path
        ),
        InitOutcome::Created | InitOutcome::Replaced => println!(
            "{} Configuration initialized at {}",
            style("[OK]").green(),
            path
        ),
    }
    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> BuildInfoResult<()> {
    manager
        .update(config, |config| {
            match key.split('.').collect::<Vec<_>>().as_slice() {
                ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
                ["general", "log_format"] => config.general.log_format = parse_log_format(value)?,
                ["output", "pretty"] => config.output.pretty = parse_bool(value)?,
                ["output", "remove_attrs"] => config.output.remove_attrs = parse_bool(value)?,
                _ => {
                    return Err(BuildInfoError::User(format!(
                        "Unknown config key '{}'. Valid keys: general.verbose, general.log_format, output.pretty, output.remove_attrs",
                        key
                    )))
                }
            }
            Ok(())
        })
        .await?;

    println!("{} Set {} = {}", style("[OK]").green(), key, value);
    Ok(())
}

fn parse_bool(value: &str) -> BuildInfoResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(BuildInfoError::User(format!(
            "Invalid boolean value: {}",
            value
        ))),
    }
}

fn parse_log_format(value: &str) -> BuildInfoResult<String> {
    match value {
        "text" | "json" => Ok(value.to_string()),
        _ => Err(BuildInfoError::User(format!(
            "Invalid log format: {} (expected text or json)",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_bool_values() {
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("OFF").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[tokio::test]
    async fn set_value_persists() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        set_value(&manager, &Config::default(), "output.pretty", "false")
            .await
            .unwrap();

        let loaded = manager.load().await.unwrap();
        assert!(!loaded.output.pretty);
    }

    #[tokio::test]
    async fn set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("config.toml"));

        let err = set_value(&manager, &Config::default(), "vm.name", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, BuildInfoError::User(_)));
        assert!(!manager.path().exists());
    }
}
