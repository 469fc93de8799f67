/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When BoardConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};

use taskboard_core::CorruptDataPolicy;

use crate::config::{BoardConfig, LogConfig};

pub fn run_init(output: &Path, theme: &ColorfulTheme) -> Result<()> {
    println!("{}", style("Welcome to Task Board Init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a new board configuration.").dim()
    );

    let defaults = BoardConfig::default();
    let suggested_dir = defaults
        .resolve_data_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();

    let data_dir: String = Input::with_theme(theme)
        .with_prompt("Data directory")
        .default(suggested_dir)
        .interact_text()?;

    let storage_key: String = Input::with_theme(theme)
        .with_prompt("Storage key")
        .default(defaults.storage_key.clone())
        .interact_text()?;

    let policies = ["reset", "fail"];
    let policy_selection = Select::with_theme(theme)
        .with_prompt("When stored tasks are unreadable")
        .items(&policies)
        .default(0)
        .interact()?;
    let on_corrupt = if policy_selection == 0 {
        CorruptDataPolicy::Reset
    } else {
        CorruptDataPolicy::Fail
    };

    let levels = ["error", "warn", "info", "debug", "trace"];
    let level_selection = Select::with_theme(theme)
        .with_prompt("Log level")
        .items(&levels)
        .default(1)
        .interact()?;

    let config = BoardConfig {
        data_dir: Some(PathBuf::from(data_dir)),
        storage_key,
        on_corrupt,
        log: LogConfig {
            level: levels[level_selection].to_string(),
            file: None,
        },
    };

    write_config(&config, output)?;

    println!("\n{}", style("SUCCESS!").bold().green());
    println!("Configuration written to: {}", style(output.display()).cyan());
    Ok(())
}

pub fn write_config(config: &BoardConfig, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    std::fs::write(output, config.to_yaml()?)
        .with_context(|| format!("failed to write config to {}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads_back() {
        let tmp_dir = TempDir::new().unwrap();
        let output = tmp_dir.path().join("conf").join("config.yaml");
        let config = BoardConfig {
            data_dir: Some(tmp_dir.path().join("data")),
            storage_key: "night-shift".to_string(),
            on_corrupt: CorruptDataPolicy::Fail,
            log: LogConfig::default(),
        };

        write_config(&config, &output).unwrap();
        let loaded = BoardConfig::load(Some(&output)).unwrap();

        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.storage_key, "night-shift");
        assert_eq!(loaded.on_corrupt, CorruptDataPolicy::Fail);
    }
}
