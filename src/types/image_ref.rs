// ABOUTME: Container image references produced by remote builds.
// ABOUTME: Builds registry/repository:tag references and validates tags up front.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const MAX_TAG_LEN: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageTagError {
    #[error("image tag cannot be empty")]
    Empty,

    #[error("image tag must be at most 128 characters")]
    TooLong,

    #[error("image tag cannot start with '{0}'")]
    InvalidStart(char),

    #[error("invalid character in image tag: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: String,
    name: String,
    tag: String,
}

impl ImageRef {
    /// Reference for an image pushed to `registry` as `name:tag`.
    pub fn new(registry: impl Into<String>, name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            registry: registry.into(),
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Check a tag against registry rules: 1-128 of `[A-Za-z0-9_.-]`, not
    /// starting with `.` or `-`.
    pub fn check_tag(tag: &str) -> Result<(), ImageTagError> {
        let Some(first) = tag.chars().next() else {
            return Err(ImageTagError::Empty);
        };

        if tag.len() > MAX_TAG_LEN {
            return Err(ImageTagError::TooLong);
        }

        if let Some(c) = tag
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '.' | '-'))
        {
            return Err(ImageTagError::InvalidChar(c));
        }

        if matches!(first, '.' | '-') {
            return Err(ImageTagError::InvalidStart(first));
        }

        Ok(())
    }

    /// `name:tag` without the registry, as registry build commands expect it.
    pub fn repository_tag(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.registry, self.name, self.tag)
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
