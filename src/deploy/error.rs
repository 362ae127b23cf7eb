// ABOUTME: Error type for the deploy call.
// ABOUTME: A failed deploy is fatal and is never retried.

use super::DeployAction;
use crate::cloud::CloudError;
use crate::types::AppName;

/// Errors from the deploy stage.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The deploy call itself failed.
    #[error("failed to {action} container app '{app}': {source}")]
    DeployFailed {
        action: DeployAction,
        app: AppName,
        source: CloudError,
    },
}
