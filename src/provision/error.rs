// ABOUTME: Error type for failed resource creation.
// ABOUTME: Records what the preceding existence check saw so ambiguous failures read clearly.

use super::Existence;
use crate::cloud::{CloudError, ResourceKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Creation failed after the resource was confirmed absent.
    #[error("failed to create {kind} '{name}': {source}")]
    CreateFailed {
        kind: ResourceKind,
        name: String,
        source: CloudError,
    },

    /// Creation failed after the existence check itself errored.
    #[error(
        "failed to create {kind} '{name}' (existence check also failed: {check_error}): {source}"
    )]
    CreateFailedAfterCheckError {
        kind: ResourceKind,
        name: String,
        check_error: String,
        source: CloudError,
    },
}

impl ProvisioningError {
    pub(crate) fn create_failed(
        kind: ResourceKind,
        name: &str,
        observed: &Existence,
        source: CloudError,
    ) -> Self {
        match observed {
            Existence::CheckFailed { reason } => ProvisioningError::CreateFailedAfterCheckError {
                kind,
                name: name.to_string(),
                check_error: reason.clone(),
                source,
            },
            _ => ProvisioningError::CreateFailed {
                kind,
                name: name.to_string(),
                source,
            },
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ProvisioningError::CreateFailed { kind, .. }
            | ProvisioningError::CreateFailedAfterCheckError { kind, .. } => *kind,
        }
    }
}
