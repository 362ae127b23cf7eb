// ABOUTME: Optional launchpad.yml tuning file.
// ABOUTME: Ports, image tag, timeouts and sizing; every field has a default.

use super::{ConfigError, HealthSettings};
use crate::types::ImageRef;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILENAME: &str = "launchpad.yml";
pub const SETTINGS_FILENAME_ALT: &str = "launchpad.yaml";
pub const SETTINGS_FILENAME_DIR: &str = ".launchpad/config.yml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Container port the ingress forwards to.
    #[serde(default = "default_target_port")]
    pub target_port: u16,

    #[serde(default = "default_image_tag")]
    pub image_tag: String,

    /// Dockerfile path, relative to the project directory.
    #[serde(default = "default_dockerfile")]
    pub dockerfile: PathBuf,

    #[serde(default = "default_registry_sku")]
    pub registry_sku: String,

    #[serde(default = "default_registry_domain")]
    pub registry_domain: String,

    #[serde(default = "default_build_timeout", with = "humantime_serde")]
    pub build_timeout: Duration,

    #[serde(default = "default_cpu")]
    pub cpu: String,

    #[serde(default = "default_memory")]
    pub memory: String,

    #[serde(default)]
    pub scale: ScaleSettings,

    #[serde(default)]
    pub health: HealthSettings,

    #[serde(default = "default_tools_path")]
    pub tools_path: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScaleSettings {
    #[serde(default = "default_min_replicas")]
    pub min_replicas: u32,
    #[serde(default = "default_max_replicas")]
    pub max_replicas: u32,
}

impl Default for ScaleSettings {
    fn default() -> Self {
        Self {
            min_replicas: default_min_replicas(),
            max_replicas: default_max_replicas(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_port: default_target_port(),
            image_tag: default_image_tag(),
            dockerfile: default_dockerfile(),
            registry_sku: default_registry_sku(),
            registry_domain: default_registry_domain(),
            build_timeout: default_build_timeout(),
            cpu: default_cpu(),
            memory: default_memory(),
            scale: ScaleSettings::default(),
            health: HealthSettings::default(),
            tools_path: default_tools_path(),
        }
    }
}

fn default_target_port() -> u16 {
    8000
}

fn default_image_tag() -> String {
    "latest".to_string()
}

fn default_dockerfile() -> PathBuf {
    PathBuf::from("Dockerfile")
}

fn default_registry_sku() -> String {
    "Basic".to_string()
}

fn default_registry_domain() -> String {
    "azurecr.io".to_string()
}

fn default_build_timeout() -> Duration {
    Duration::from_secs(20 * 60)
}

fn default_cpu() -> String {
    "0.5".to_string()
}

fn default_memory() -> String {
    "1.0Gi".to_string()
}

fn default_min_replicas() -> u32 {
    1
}

fn default_max_replicas() -> u32 {
    3
}

fn default_tools_path() -> String {
    "/mcp/tools/list".to_string()
}

impl Settings {
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings =
            serde_yaml::from_str(yaml).map_err(|source| ConfigError::SettingsParse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Err(e) = ImageRef::check_tag(&settings.image_tag) {
            return Err(ConfigError::InvalidValue {
                key: "image_tag",
                reason: e.to_string(),
            });
        }

        if settings.scale.min_replicas > settings.scale.max_replicas {
            return Err(ConfigError::InvalidValue {
                key: "scale",
                reason: format!(
                    "min_replicas ({}) exceeds max_replicas ({})",
                    settings.scale.min_replicas, settings.scale.max_replicas
                ),
            });
        }

        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::SettingsRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml(&content, path)
    }

    /// Load settings from the first candidate file in `dir`, or defaults if none exists.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let candidates = [
            dir.join(SETTINGS_FILENAME),
            dir.join(SETTINGS_FILENAME_ALT),
            dir.join(SETTINGS_FILENAME_DIR),
        ];

        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
