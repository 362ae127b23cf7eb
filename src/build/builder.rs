// ABOUTME: Remote build-and-push of the service image.
// ABOUTME: Any failure or timeout becomes a DeferredSource outcome, never an error.

use super::context::BuildContext;
use super::outcome::BuildOutcome;
use crate::cloud::{BuildRequest, CloudClient, CloudError};
use crate::config::{DeploymentConfig, Settings};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::ImageRef;
use std::time::Duration;

/// Runs the one remote build attempt of a run.
pub struct ImageBuilder<'a, C> {
    client: &'a C,
    timeout: Duration,
}

impl<'a, C: CloudClient> ImageBuilder<'a, C> {
    pub fn new(client: &'a C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Image reference a remote build pushes for this app.
    pub fn image_for(config: &DeploymentConfig, settings: &Settings) -> ImageRef {
        ImageRef::new(
            config.registry.login_server(&settings.registry_domain),
            config.app_name.as_str(),
            settings.image_tag.as_str(),
        )
    }

    /// Attempt the remote build once. No retry.
    pub async fn build(
        &self,
        config: &DeploymentConfig,
        settings: &Settings,
        context: &BuildContext,
        diag: &mut Diagnostics,
    ) -> BuildOutcome {
        let image = Self::image_for(config, settings);
        let request = BuildRequest {
            registry: config.registry.clone(),
            image: image.clone(),
            context_dir: context.dir().to_path_buf(),
            dockerfile: context.dockerfile().to_path_buf(),
        };

        tracing::info!("Building {} in registry {}", image, config.registry);

        let result = match tokio::time::timeout(self.timeout, self.client.build_image(&request)).await
        {
            Ok(result) => result,
            Err(_) => Err(CloudError::Timeout {
                command: format!("acr build {}", image),
                timeout: self.timeout,
            }),
        };

        match result {
            Ok(()) => {
                tracing::info!("Pushed {}", image);
                BuildOutcome::Remote { image }
            }
            Err(e) => {
                let reason = e.to_string();
                diag.warn(Warning::remote_build_failed(format!(
                    "remote build failed ({}); deploying from source instead",
                    reason
                )));
                BuildOutcome::DeferredSource { reason }
            }
        }
    }
}
