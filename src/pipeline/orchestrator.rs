// ABOUTME: End-to-end run driver: validate, provision, build, deploy, verify.
// ABOUTME: Walks the Run state machine and reports progress through Output.

use std::collections::HashMap;
use std::path::Path;

use super::report::RunReport;
use super::run::Run;
use crate::build::BuildContext;
use crate::cloud::CloudClient;
use crate::config::{ConfigError, DeploymentConfig, Settings};
use crate::error::Result;
use crate::output::Output;
use crate::verify::HealthProbe;

/// Drives one deployment run against a cloud client and a health probe.
pub struct Orchestrator<'a, C, P> {
    client: &'a C,
    probe: &'a P,
    output: &'a Output,
}

impl<'a, C: CloudClient, P: HealthProbe> Orchestrator<'a, C, P> {
    pub fn new(client: &'a C, probe: &'a P, output: &'a Output) -> Self {
        Self {
            client,
            probe,
            output,
        }
    }

    /// Run the whole pipeline.
    ///
    /// The environment is validated first, then `load_settings` reads the
    /// project settings, then the build context is checked; all of this
    /// happens before the first cloud call. Returns `Err` only for fatal
    /// stages; the report of a successful run may still carry warnings.
    pub async fn run<L>(
        &self,
        vars: &HashMap<String, String>,
        project_dir: &Path,
        load_settings: L,
    ) -> Result<RunReport>
    where
        L: FnOnce(&Path) -> std::result::Result<Settings, ConfigError>,
    {
        let config = DeploymentConfig::from_vars(vars)?;
        let settings = load_settings(project_dir)?;
        let context = BuildContext::discover(project_dir, &settings.dockerfile)?;
        let verify_health = settings.health.enabled;

        self.output.progress(&format!(
            "Deploying {} to {} ({})",
            config.app_name, config.resource_group, config.location
        ));

        let run = Run::new(config, settings, context);

        self.output.progress("  → Ensuring resources...");
        let run = run.ensure_resources(self.client).await?;
        for resource in run.resources() {
            let verb = if resource.created { "created" } else { "exists" };
            self.output
                .progress(&format!("    {} '{}': {}", resource.kind, resource.name, verb));
        }

        self.output.progress("  → Building image...");
        let run = run.attempt_build(self.client).await;
        if let Some(image) = run.build_outcome().image() {
            self.output.progress(&format!("    pushed {image}"));
        } else {
            self.output.progress("    remote build unavailable, deploying from source");
        }

        self.output
            .progress(&format!("  → Deploying ({})...", run.action()));
        let run = run.deploy(self.client).await?;

        if !verify_health {
            tracing::debug!("Health verification disabled");
            return Ok(run.locate(self.client).await.finish());
        }

        self.output.progress("  → Verifying health...");
        let run = run.verify(self.client, self.probe).await;
        Ok(run.finish())
    }
}
