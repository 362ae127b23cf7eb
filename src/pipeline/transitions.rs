// ABOUTME: State transition methods for the deployment run.
// ABOUTME: Fallible stages return Result; build and verification only route or annotate.

use chrono::Utc;

use super::report::{RunReport, SummaryLinks};
use super::run::Run;
use super::state::{BuildAttempted, ConfigValidated, Deployed, HealthChecked, ResourcesEnsured};
use crate::build::{BuildOutcome, ImageBuilder};
use crate::cloud::CloudClient;
use crate::deploy::{AppDeployer, DeployAction, DeployOutcome};
use crate::diagnostics::Warning;
use crate::error::Result;
use crate::provision::Provisioner;
use crate::verify::{HealthProbe, HealthVerifier, Verification, resolve_endpoint};

impl<S> Run<S> {
    /// Internal helper to move to the next state, carrying everything else over.
    fn transition<T>(self, state: T) -> Run<T> {
        Run {
            config: self.config,
            settings: self.settings,
            context: self.context,
            resources: self.resources,
            diagnostics: self.diagnostics,
            started_at: self.started_at,
            state,
        }
    }

    fn into_report(
        self,
        build: &BuildOutcome,
        outcome: &DeployOutcome,
        verification: Option<Verification>,
    ) -> RunReport {
        let links = outcome
            .endpoint
            .as_ref()
            .map(|endpoint| SummaryLinks::new(endpoint, &self.settings));

        RunReport {
            app: self.config.app_name.clone(),
            resource_group: self.config.resource_group.clone(),
            action: outcome.action,
            strategy: build.strategy(),
            image: build.image().cloned(),
            resources: self.resources,
            endpoint: outcome.endpoint.clone(),
            health: verification.map(|v| v.health),
            links,
            warnings: self.diagnostics.into_warnings(),
            api_key: self.config.primary_api_key().map(str::to_string),
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}

impl Run<ConfigValidated> {
    /// Ensure the resource group, environment and registry, in that order,
    /// then decide create vs update from the app's current existence.
    ///
    /// A failed creation aborts the run; later resources are never touched.
    pub async fn ensure_resources<C: CloudClient>(
        mut self,
        client: &C,
    ) -> Result<Run<ResourcesEnsured>> {
        let provisioner = Provisioner::new(client);
        let config = &self.config;

        let group = provisioner
            .ensure_resource_group(&config.resource_group, &config.location, &mut self.diagnostics)
            .await?;
        self.resources.push(group);

        let environment = provisioner
            .ensure_environment(
                &config.environment,
                &config.resource_group,
                &config.location,
                &mut self.diagnostics,
            )
            .await?;
        self.resources.push(environment);

        let registry = provisioner
            .ensure_registry(
                &config.registry,
                &config.resource_group,
                &config.location,
                &self.settings.registry_sku,
                &mut self.diagnostics,
            )
            .await?;
        self.resources.push(registry);

        let app = provisioner
            .check_app_exists(&config.app_name, &config.resource_group, &mut self.diagnostics)
            .await;
        let action = DeployAction::for_existence(&app);

        tracing::debug!("Container app {} will be {}d", config.app_name, action);
        Ok(self.transition(ResourcesEnsured { app, action }))
    }
}

impl Run<ResourcesEnsured> {
    /// Attempt the remote build once. Never fails.
    pub async fn attempt_build<C: CloudClient>(mut self, client: &C) -> Run<BuildAttempted> {
        let builder = ImageBuilder::new(client, self.settings.build_timeout);
        let outcome = builder
            .build(&self.config, &self.settings, &self.context, &mut self.diagnostics)
            .await;

        let action = self.state.action;
        self.transition(BuildAttempted { action, outcome })
    }
}

impl Run<BuildAttempted> {
    /// Issue the single deploy call.
    pub async fn deploy<C: CloudClient>(self, client: &C) -> Result<Run<Deployed>> {
        let outcome = AppDeployer::new(client)
            .deploy(
                &self.config,
                &self.settings,
                self.state.action,
                &self.state.outcome,
                &self.context,
            )
            .await?;

        let build = self.state.outcome.clone();
        Ok(self.transition(Deployed { build, outcome }))
    }
}

impl Run<Deployed> {
    /// Resolve the endpoint and probe it. Problems become warnings only.
    pub async fn verify<C: CloudClient, P: HealthProbe>(
        mut self,
        client: &C,
        probe: &P,
    ) -> Run<HealthChecked> {
        let verification = HealthVerifier::new(client, probe, &self.settings.health)
            .verify(&self.config, &mut self.diagnostics)
            .await;

        let Deployed { build, mut outcome } = self.state.clone();
        outcome.endpoint = verification.endpoint.clone();

        self.transition(HealthChecked {
            build,
            outcome,
            verification,
        })
    }

    /// Look up the public endpoint without probing it.
    ///
    /// Used when health verification is disabled so the summary still shows
    /// where the app lives. A missing endpoint is a warning only.
    pub async fn locate<C: CloudClient>(mut self, client: &C) -> Run<Deployed> {
        match resolve_endpoint(client, &self.config).await {
            Ok(endpoint) => self.state.outcome.endpoint = Some(endpoint),
            Err(reason) => self.diagnostics.warn(Warning::endpoint_unavailable(format!(
                "could not resolve public endpoint of '{}': {}",
                self.config.app_name, reason
            ))),
        }
        self
    }

    /// Finish without verification.
    pub fn finish(self) -> RunReport {
        let Deployed { build, outcome } = self.state.clone();
        self.into_report(&build, &outcome, None)
    }
}

impl Run<HealthChecked> {
    pub fn finish(self) -> RunReport {
        let HealthChecked {
            build,
            outcome,
            verification,
        } = self.state.clone();
        self.into_report(&build, &outcome, Some(verification))
    }
}
