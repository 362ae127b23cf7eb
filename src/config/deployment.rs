// ABOUTME: Immutable deployment configuration built from environment values.
// ABOUTME: Checks every required key is present before names are validated.

use super::ConfigError;
use crate::types::{AppName, RegistryName};
use std::collections::HashMap;

/// Environment keys read at startup.
pub mod keys {
    pub const RESOURCE_GROUP: &str = "AZURE_RESOURCE_GROUP";
    pub const APP_NAME: &str = "AZURE_CONTAINER_APP_NAME";
    pub const ENVIRONMENT: &str = "AZURE_CONTAINER_APP_ENV";
    pub const LOCATION: &str = "AZURE_LOCATION";
    pub const REGISTRY: &str = "AZURE_ACR_NAME";
    pub const API_KEYS: &str = "API_KEYS";
    pub const CONNECTION_STRING: &str = "SQL_SERVER_CONNECTION_STRING";

    /// Required keys in the order they are checked.
    pub const REQUIRED: [&str; 5] = [RESOURCE_GROUP, APP_NAME, ENVIRONMENT, LOCATION, REGISTRY];
}

/// Everything a run needs to know about its target, fixed before the first stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentConfig {
    pub resource_group: String,
    pub app_name: AppName,
    pub environment: String,
    pub location: String,
    pub registry: RegistryName,
    /// Raw `API_KEYS` value; may hold several comma-separated keys or be empty.
    pub api_keys: String,
    /// Raw `SQL_SERVER_CONNECTION_STRING` value; empty when not configured.
    pub connection_string: String,
}

impl DeploymentConfig {
    /// Validate a snapshot of configuration values.
    ///
    /// All required keys are checked for presence first, in [`keys::REQUIRED`]
    /// order, so the error always names the first missing key. Blank values
    /// count as missing. Optional keys default to an empty string.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        for key in keys::REQUIRED {
            if lookup(vars, key).is_none() {
                return Err(ConfigError::MissingKey(key));
            }
        }

        let required = |key: &'static str| lookup(vars, key).ok_or(ConfigError::MissingKey(key));

        let app_name =
            AppName::new(required(keys::APP_NAME)?).map_err(|e| ConfigError::InvalidValue {
                key: keys::APP_NAME,
                reason: e.to_string(),
            })?;

        let registry =
            RegistryName::new(required(keys::REGISTRY)?).map_err(|e| ConfigError::InvalidValue {
                key: keys::REGISTRY,
                reason: e.to_string(),
            })?;

        Ok(Self {
            resource_group: required(keys::RESOURCE_GROUP)?.to_string(),
            app_name,
            environment: required(keys::ENVIRONMENT)?.to_string(),
            location: required(keys::LOCATION)?.to_string(),
            registry,
            api_keys: lookup(vars, keys::API_KEYS).unwrap_or_default().to_string(),
            connection_string: lookup(vars, keys::CONNECTION_STRING)
                .unwrap_or_default()
                .to_string(),
        })
    }

    /// First configured API key, used to authenticate the health probe.
    pub fn primary_api_key(&self) -> Option<&str> {
        self.api_keys
            .split(',')
            .map(str::trim)
            .find(|key| !key.is_empty())
    }

    /// Environment variables injected into the deployed workload.
    pub fn workload_env(&self) -> Vec<(String, String)> {
        vec![
            (keys::API_KEYS.to_string(), self.api_keys.clone()),
            (
                keys::CONNECTION_STRING.to_string(),
                self.connection_string.clone(),
            ),
        ]
    }
}

fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
