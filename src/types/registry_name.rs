// ABOUTME: Container registry name validation.
// ABOUTME: Registry names are 5-50 alphanumerics and determine the login server.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryNameError {
    #[error("registry name must be between 5 and 50 characters")]
    InvalidLength,

    #[error("invalid character in registry name: '{0}' (only letters and digits allowed)")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RegistryName(String);

impl RegistryName {
    pub fn new(value: &str) -> Result<Self, RegistryNameError> {
        if value.len() < 5 || value.len() > 50 {
            return Err(RegistryNameError::InvalidLength);
        }

        if let Some(c) = value.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(RegistryNameError::InvalidChar(c));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Login server address for this registry under the given DNS domain.
    /// Registry hostnames are always lowercase regardless of how the name was typed.
    pub fn login_server(&self, domain: &str) -> String {
        format!("{}.{}", self.0.to_ascii_lowercase(), domain)
    }
}

impl fmt::Display for RegistryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
