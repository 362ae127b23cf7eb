// ABOUTME: Builds the deploy request from config, app existence and build outcome.
// ABOUTME: Issues exactly one deploy call through the cloud client.

use super::error::DeployError;
use super::outcome::DeployOutcome;
use super::{DeployAction, DeploySource};
use crate::build::{BuildContext, BuildOutcome};
use crate::cloud::{CloudClient, DeployRequest};
use crate::config::{DeploymentConfig, Settings};
use crate::provision::Existence;

impl DeployAction {
    /// Update only when the app was confirmed to exist at the start of the run.
    /// An inconclusive check deploys as a new app.
    pub fn for_existence(existence: &Existence) -> Self {
        if existence.exists() {
            DeployAction::Update
        } else {
            DeployAction::Create
        }
    }
}

impl DeploySource {
    /// Pick the deploy input for a build outcome: the pushed image, or the
    /// build context directory for a platform-side build.
    pub fn for_build(outcome: &BuildOutcome, context: &BuildContext) -> Self {
        match outcome {
            BuildOutcome::Remote { image } => DeploySource::Image(image.clone()),
            BuildOutcome::DeferredSource { .. } => {
                DeploySource::SourceDir(context.dir().to_path_buf())
            }
        }
    }
}

/// Deploys the container app.
pub struct AppDeployer<'a, C> {
    client: &'a C,
}

impl<'a, C: CloudClient> AppDeployer<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Assemble the request for the single deploy call.
    pub fn request(
        config: &DeploymentConfig,
        settings: &Settings,
        action: DeployAction,
        outcome: &BuildOutcome,
        context: &BuildContext,
    ) -> DeployRequest {
        DeployRequest {
            action,
            app: config.app_name.clone(),
            resource_group: config.resource_group.clone(),
            environment: config.environment.clone(),
            location: config.location.clone(),
            source: DeploySource::for_build(outcome, context),
            registry_server: config.registry.login_server(&settings.registry_domain),
            target_port: settings.target_port,
            env: config.workload_env(),
            cpu: settings.cpu.clone(),
            memory: settings.memory.clone(),
            scale: settings.scale,
        }
    }

    pub async fn deploy(
        &self,
        config: &DeploymentConfig,
        settings: &Settings,
        action: DeployAction,
        outcome: &BuildOutcome,
        context: &BuildContext,
    ) -> Result<DeployOutcome, DeployError> {
        let request = Self::request(config, settings, action, outcome, context);

        match &request.source {
            DeploySource::Image(image) => {
                tracing::info!("Deploying {} ({}) from image {}", config.app_name, action, image)
            }
            DeploySource::SourceDir(dir) => tracing::info!(
                "Deploying {} ({}) from source {}",
                config.app_name,
                action,
                dir.display()
            ),
        }

        self.client
            .deploy_app(&request)
            .await
            .map_err(|source| DeployError::DeployFailed {
                action,
                app: config.app_name.clone(),
                source,
            })?;

        Ok(DeployOutcome {
            action,
            source: request.source,
            endpoint: None,
            success: true,
        })
    }
}
