/*
[INPUT]:  Optional YAML config file, TASKBOARD_* environment variables
[OUTPUT]: Resolved board configuration (storage location, corrupt-data policy, logging)
[POS]:    Configuration layer - startup settings
[UPDATE]: When adding new configuration options
*/

use anyhow::{Context, Result, anyhow};
use ::config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use taskboard_core::{CorruptDataPolicy, DEFAULT_STORAGE_KEY};

const APP_DIR: &str = "taskboard";
const CONFIG_FILE: &str = "config.yaml";

/// Top-level configuration for the board CLI
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Directory holding the task record; platform data dir when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Storage key of the task list record
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Policy for unreadable persisted data
    #[serde(default)]
    pub on_corrupt: CorruptDataPolicy,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "taskboard_core=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append logs to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: default_storage_key(),
            on_corrupt: CorruptDataPolicy::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// `<config_dir>/taskboard/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl BoardConfig {
    /// Layer an explicit (required) or default (optional) YAML file under the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`BoardConfig::load`], reading `TASKBOARD_*` from `env` instead of the process
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let file = match path {
            Some(path) => Some(File::from(path).format(FileFormat::Yaml).required(true)),
            None => default_config_path()
                .map(|path| File::from(path).format(FileFormat::Yaml).required(false)),
        };

        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let config = builder
            .add_source(
                Environment::with_prefix("TASKBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .context("read configuration sources")?;

        config
            .try_deserialize()
            .context("parse configuration")
    }

    /// Command-line flags win over every other source
    pub fn apply_overrides(&mut self, data_dir: Option<PathBuf>, log_level: Option<String>) {
        if let Some(data_dir) = data_dir {
            self.data_dir = Some(data_dir);
        }
        if let Some(log_level) = log_level {
            self.log.level = log_level;
        }
    }

    /// Directory holding the task record
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| anyhow!("Could not determine data directory")),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config to YAML")
    }
}
