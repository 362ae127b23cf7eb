// ABOUTME: Generic run struct parameterized by state marker.
// ABOUTME: Holds the immutable inputs and everything collected along the way.

use chrono::{DateTime, Utc};

use super::state::{BuildAttempted, ConfigValidated, Deployed, HealthChecked, ResourcesEnsured};
use crate::build::{BuildContext, BuildOutcome};
use crate::config::{DeploymentConfig, Settings};
use crate::deploy::{DeployAction, DeployOutcome};
use crate::diagnostics::Diagnostics;
use crate::provision::{Existence, ResourceDescriptor};
use crate::verify::Verification;

/// A deployment run in progress, parameterized by its current state.
///
/// Transitions consume the run and return the next state, so stages cannot be
/// skipped or repeated. Config and settings are never mutated after creation.
#[derive(Debug)]
pub struct Run<S> {
    pub(crate) config: DeploymentConfig,
    pub(crate) settings: Settings,
    pub(crate) context: BuildContext,
    pub(crate) resources: Vec<ResourceDescriptor>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) started_at: DateTime<Utc>,
    pub(crate) state: S,
}

impl Run<ConfigValidated> {
    /// Start a run from validated inputs.
    pub fn new(config: DeploymentConfig, settings: Settings, context: BuildContext) -> Self {
        Run {
            config,
            settings,
            context,
            resources: Vec::new(),
            diagnostics: Diagnostics::default(),
            started_at: Utc::now(),
            state: ConfigValidated,
        }
    }
}

impl<S> Run<S> {
    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resources ensured so far.
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}

impl Run<ResourcesEnsured> {
    /// App existence observed before the build.
    pub fn app_existence(&self) -> &Existence {
        &self.state.app
    }

    pub fn action(&self) -> DeployAction {
        self.state.action
    }
}

impl Run<BuildAttempted> {
    pub fn action(&self) -> DeployAction {
        self.state.action
    }

    pub fn build_outcome(&self) -> &BuildOutcome {
        &self.state.outcome
    }
}

impl Run<Deployed> {
    pub fn build_outcome(&self) -> &BuildOutcome {
        &self.state.build
    }

    pub fn deploy_outcome(&self) -> &DeployOutcome {
        &self.state.outcome
    }
}

impl Run<HealthChecked> {
    pub fn build_outcome(&self) -> &BuildOutcome {
        &self.state.build
    }

    pub fn deploy_outcome(&self) -> &DeployOutcome {
        &self.state.outcome
    }

    pub fn verification(&self) -> &Verification {
        &self.state.verification
    }
}
