// ABOUTME: Run state marker types for the type state pattern.
// ABOUTME: States carry the data produced by the stage that reached them.

use crate::build::BuildOutcome;
use crate::deploy::{DeployAction, DeployOutcome};
use crate::provision::Existence;
use crate::verify::Verification;
use serde::Serialize;
use std::fmt;

/// Config validated and build context located; no cloud call made yet.
/// Available actions: `ensure_resources()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidated;

/// Group, environment and registry exist; deploy action decided.
/// Available actions: `attempt_build()`
#[derive(Debug, Clone)]
pub struct ResourcesEnsured {
    pub(crate) app: Existence,
    pub(crate) action: DeployAction,
}

/// Remote build attempted; deploy source decided.
/// Available actions: `deploy()`
#[derive(Debug, Clone)]
pub struct BuildAttempted {
    pub(crate) action: DeployAction,
    pub(crate) outcome: BuildOutcome,
}

/// App deployed.
/// Available actions: `verify()`, `finish()`
#[derive(Debug, Clone)]
pub struct Deployed {
    pub(crate) build: BuildOutcome,
    pub(crate) outcome: DeployOutcome,
}

/// Endpoint resolved and probed (successfully or not).
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct HealthChecked {
    pub(crate) build: BuildOutcome,
    pub(crate) outcome: DeployOutcome,
    pub(crate) verification: Verification,
}

/// Named stages, used to report where a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Init,
    ConfigValidated,
    ResourcesEnsured,
    BuildAttempted,
    Deployed,
    HealthChecked,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::ConfigValidated => "config validation",
            Stage::ResourcesEnsured => "resource provisioning",
            Stage::BuildAttempted => "image build",
            Stage::Deployed => "deploy",
            Stage::HealthChecked => "health check",
            Stage::Done => "done",
        };
        write!(f, "{name}")
    }
}
