// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Ambiguous existence checks, build fallbacks and failed probes land here, never in errors.

use serde::Serialize;

/// Collects non-fatal warnings during a deployment run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check whether a warning of the given kind was recorded.
    pub fn has_kind(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// An existence check errored; the resource was treated as absent.
    pub fn existence_check_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ExistenceCheckFailed,
            message: message.into(),
        }
    }

    /// The remote build failed; deploy falls back to a source build.
    pub fn remote_build_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::RemoteBuildFailed,
            message: message.into(),
        }
    }

    /// The public endpoint could not be resolved after deploy.
    pub fn endpoint_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::EndpointUnavailable,
            message: message.into(),
        }
    }

    /// The health probe timed out, errored or returned a non-2xx status.
    pub fn health_check_failed(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::HealthCheckFailed,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ExistenceCheckFailed,
    RemoteBuildFailed,
    EndpointUnavailable,
    HealthCheckFailed,
}
