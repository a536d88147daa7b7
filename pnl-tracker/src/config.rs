//! Configuration for the P&L tracker.
//!
//! Settings come from (highest precedence first):
//! 1. The `PNL_DATA_DIR` environment variable, for the data directory only
//! 2. A YAML file, `~/.config/pnl-tracker/config.yaml` unless `--config` is given
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backend::domain::{
    backup_service::DEFAULT_BACKUP_FILE_PREFIX,
    record_service::DEFAULT_CARRY_FORWARD_CATEGORIES,
    summary_service::{DEFAULT_CHART_WINDOW, DEFAULT_RECENT_ACTIVITY_LIMIT},
};

const APP_DIR_NAME: &str = "pnl-tracker";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "PNL_DATA_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where records and the custom structure are stored.
    /// Defaults to `~/.local/share/pnl-tracker`
    pub data_directory: Option<PathBuf>,
    /// Symbol printed in front of amounts
    pub currency_symbol: String,
    /// Number of most recent records plotted on the dashboard
    pub chart_window: usize,
    /// Number of records listed under recent activity
    pub recent_activity_limit: usize,
    /// Categories whose amounts new records copy from the latest record
    pub carry_forward_categories: Vec<String>,
    /// Backup files are named `{prefix}-{date}.json`
    pub backup_file_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: None,
            currency_symbol: "₹".to_string(),
            chart_window: DEFAULT_CHART_WINDOW,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            carry_forward_categories: DEFAULT_CARRY_FORWARD_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            backup_file_prefix: DEFAULT_BACKUP_FILE_PREFIX.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration with an optional custom config path.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let config = Self::from_file(&config_file)?
            .with_data_dir_override(std::env::var_os(DATA_DIR_ENV));
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn with_data_dir_override(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            debug!("{} overrides the data directory", DATA_DIR_ENV);
            self.data_directory = Some(PathBuf::from(dir));
        }
        self
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// The data directory, resolving the default if not set
    #[must_use]
    pub fn data_directory(&self) -> PathBuf {
        self.data_directory
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chart_window == 0 {
            return Err(ConfigError::Validation(
                "chart_window must be greater than 0".to_string(),
            ));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Validation(
                "currency_symbol cannot be empty".to_string(),
            ));
        }
        if self.backup_file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "backup_file_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
