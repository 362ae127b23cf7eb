// ABOUTME: Configuration for a deployment run.
// ABOUTME: Validates required environment keys and loads the optional launchpad.yml tuning file.

mod deployment;
mod health;
mod settings;

pub use deployment::{DeploymentConfig, keys};
pub use health::HealthSettings;
pub use settings::{
    SETTINGS_FILENAME, SETTINGS_FILENAME_ALT, SETTINGS_FILENAME_DIR, ScaleSettings, Settings,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating configuration, before any cloud call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration value: {0}")]
    MissingKey(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("failed to read settings file {path}: {source}")]
    SettingsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl ConfigError {
    /// The configuration key this error refers to, if any.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingKey(key) | ConfigError::InvalidValue { key, .. } => Some(key),
            ConfigError::SettingsRead { .. } | ConfigError::SettingsParse { .. } => None,
        }
    }
}
