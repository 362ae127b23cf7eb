// ABOUTME: Container app name validation.
// ABOUTME: Enforces the Container Apps naming rules (2-32 chars, lowercase, hyphens).

use serde::Serialize;
use std::fmt;
use thiserror::Error;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppNameError {
    #[error("app name must be between 2 and 32 characters")]
    InvalidLength,

    #[error("app name must start with a lowercase letter")]
    MustStartWithLetter,

    #[error("app name must end with a letter or digit")]
    EndsWithHyphen,

    #[error("app name cannot contain consecutive hyphens")]
    ConsecutiveHyphens,

    #[error("app name must be lowercase")]
    NotLowercase,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        if value.len() < MIN_LEN || value.len() > MAX_LEN {
            return Err(AppNameError::InvalidLength);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(AppNameError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(AppNameError::InvalidChar(c));
            }
        }

        if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(AppNameError::MustStartWithLetter);
        }

        if value.ends_with('-') {
            return Err(AppNameError::EndsWithHyphen);
        }

        if value.contains("--") {
            return Err(AppNameError::ConsecutiveHyphens);
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
