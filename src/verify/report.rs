// ABOUTME: Health verification results attached to a finished run.
// ABOUTME: Every variant is informational; none affects the exit code.

use crate::types::Endpoint;
use serde::Serialize;

/// What the health probe found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HealthReport {
    /// The probe returned a 2xx status.
    Healthy { code: u16 },
    /// The probe returned a non-2xx status.
    Unhealthy { code: u16 },
    /// The probe timed out or could not connect.
    Unreachable { reason: String },
    /// No endpoint was available, so nothing was probed.
    NotVerified { reason: String },
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthReport::Healthy { .. })
    }
}

/// Endpoint resolution plus probe result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub endpoint: Option<Endpoint>,
    pub health: HealthReport,
}
