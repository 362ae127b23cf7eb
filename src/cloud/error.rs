// ABOUTME: Cloud client error types with SNAFU pattern.
// ABOUTME: Spawn failures, non-zero exits and timeouts, plus not-found detection.

use snafu::Snafu;
use std::time::Duration;

/// Failure of a single cloud control-plane call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CloudError {
    #[snafu(display("failed to run {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` exited with status {code:?}: {stderr}"))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[snafu(display("`{command}` timed out after {}s", timeout.as_secs()))]
    Timeout { command: String, timeout: Duration },
}

impl CloudError {
    /// Whether this error reports a missing resource rather than a failed call.
    ///
    /// Azure CLI exits with status 3 for missing resources; older commands only
    /// say so on stderr.
    pub fn is_not_found(&self) -> bool {
        match self {
            CloudError::CommandFailed { code, stderr, .. } => {
                *code == Some(3)
                    || stderr.contains("ResourceNotFound")
                    || stderr.contains("ResourceGroupNotFound")
                    || stderr.contains("could not be found")
                    || stderr.contains("was not found")
            }
            _ => false,
        }
    }
}
