// ABOUTME: Tri-state outcome of a resource existence check.
// ABOUTME: Keeps a failed check distinct from a confirmed absence.

use crate::cloud::{CloudError, ResourceKind};
use serde::Serialize;

/// What an existence check observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Existence {
    /// The control plane reported the resource.
    Exists,
    /// The control plane reported the resource as missing.
    Absent,
    /// The check itself failed; the resource may or may not exist.
    CheckFailed { reason: String },
}

impl Existence {
    pub fn from_check(result: Result<bool, CloudError>) -> Self {
        match result {
            Ok(true) => Existence::Exists,
            Ok(false) => Existence::Absent,
            Err(e) => Existence::CheckFailed {
                reason: e.to_string(),
            },
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, Existence::Exists)
    }

    pub fn is_check_failed(&self) -> bool {
        matches!(self, Existence::CheckFailed { .. })
    }
}

/// A provisioned resource and what the run observed about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub name: String,
    /// Existence observed before any creation attempt.
    pub observed: Existence,
    /// Whether this run created the resource.
    pub created: bool,
}
