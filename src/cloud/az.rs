// ABOUTME: Azure CLI implementation of CloudClient.
// ABOUTME: Shells out to `az` for resource groups, Container Apps and ACR operations.

use super::client::CloudClient;
use super::error::{CloudError, SpawnSnafu};
use super::types::{BuildRequest, DeployAction, DeployRequest, DeploySource, ResourceTarget};
use crate::types::AppName;
use async_trait::async_trait;
use snafu::ResultExt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// `az` CLI wrapper.
pub struct AzCli {
    program: PathBuf,
}

impl Default for AzCli {
    fn default() -> Self {
        Self::new()
    }
}

impl AzCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("az"),
        }
    }

    /// Use a different executable in place of `az`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run an az command and return stdout.
    async fn run(&self, args: &[String]) -> Result<String, CloudError> {
        let command = redacted(args);
        tracing::debug!("Running: az {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Callers may bound a call with a timeout; a dropped call must not leave az running
            .kill_on_drop(true)
            .output()
            .await
            .context(SpawnSnafu {
                program: self.program.display().to_string(),
            })?;

        if !output.status.success() {
            return Err(CloudError::CommandFailed {
                command: format!("az {command}"),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Run a `show`-style command, mapping not-found to `Ok(false)`.
    async fn probe(&self, args: &[String]) -> Result<bool, CloudError> {
        match self.run(args).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl CloudClient for AzCli {
    async fn exists(&self, target: &ResourceTarget) -> Result<bool, CloudError> {
        self.probe(&exists_args(target)).await
    }

    async fn create(&self, target: &ResourceTarget) -> Result<(), CloudError> {
        self.run(&create_args(target)).await?;
        Ok(())
    }

    async fn app_exists(&self, app: &AppName, resource_group: &str) -> Result<bool, CloudError> {
        let args = strings(&[
            "containerapp",
            "show",
            "--name",
            app.as_str(),
            "--resource-group",
            resource_group,
            "--output",
            "none",
        ]);
        self.probe(&args).await
    }

    async fn build_image(&self, request: &BuildRequest) -> Result<(), CloudError> {
        self.run(&build_args(request)).await?;
        Ok(())
    }

    async fn deploy_app(&self, request: &DeployRequest) -> Result<(), CloudError> {
        self.run(&deploy_args(request)).await?;
        Ok(())
    }

    async fn app_fqdn(
        &self,
        app: &AppName,
        resource_group: &str,
    ) -> Result<Option<String>, CloudError> {
        let args = strings(&[
            "containerapp",
            "show",
            "--name",
            app.as_str(),
            "--resource-group",
            resource_group,
            "--query",
            "properties.configuration.ingress.fqdn",
            "--output",
            "tsv",
        ]);
        let stdout = self.run(&args).await?;
        let fqdn = stdout.trim();

        if fqdn.is_empty() {
            Ok(None)
        } else {
            Ok(Some(fqdn.to_string()))
        }
    }
}

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Render args for logs and error messages without env var values.
fn redacted(args: &[String]) -> String {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, _)) if !arg.starts_with('-') => format!("{key}=***"),
            _ => arg.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn exists_args(target: &ResourceTarget) -> Vec<String> {
    match target {
        ResourceTarget::ResourceGroup { name, .. } => {
            strings(&["group", "show", "--name", name, "--output", "none"])
        }
        ResourceTarget::Environment {
            name,
            resource_group,
            ..
        } => strings(&[
            "containerapp",
            "env",
            "show",
            "--name",
            name,
            "--resource-group",
            resource_group,
            "--output",
            "none",
        ]),
        ResourceTarget::Registry {
            name,
            resource_group,
            ..
        } => strings(&[
            "acr",
            "show",
            "--name",
            name.as_str(),
            "--resource-group",
            resource_group,
            "--output",
            "none",
        ]),
    }
}

fn create_args(target: &ResourceTarget) -> Vec<String> {
    match target {
        ResourceTarget::ResourceGroup { name, location } => strings(&[
            "group",
            "create",
            "--name",
            name,
            "--location",
            location,
            "--output",
            "none",
        ]),
        ResourceTarget::Environment {
            name,
            resource_group,
            location,
        } => strings(&[
            "containerapp",
            "env",
            "create",
            "--name",
            name,
            "--resource-group",
            resource_group,
            "--location",
            location,
            "--output",
            "none",
        ]),
        ResourceTarget::Registry {
            name,
            resource_group,
            location,
            sku,
        } => strings(&[
            "acr",
            "create",
            "--name",
            name.as_str(),
            "--resource-group",
            resource_group,
            "--location",
            location,
            "--sku",
            sku,
            "--admin-enabled",
            "true",
            "--output",
            "none",
        ]),
    }
}

fn build_args(request: &BuildRequest) -> Vec<String> {
    vec![
        "acr".to_string(),
        "build".to_string(),
        "--registry".to_string(),
        request.registry.to_string(),
        "--image".to_string(),
        request.image.repository_tag(),
        "--file".to_string(),
        request.context_dir.join(&request.dockerfile).display().to_string(),
        request.context_dir.display().to_string(),
    ]
}

fn deploy_args(request: &DeployRequest) -> Vec<String> {
    let mut args = match (&request.source, request.action) {
        (DeploySource::Image(image), DeployAction::Create) => {
            let mut args = strings(&[
                "containerapp",
                "create",
                "--name",
                request.app.as_str(),
                "--resource-group",
                &request.resource_group,
                "--environment",
                &request.environment,
                "--image",
            ]);
            args.push(image.to_string());
            args.extend(strings(&[
                "--registry-server",
                &request.registry_server,
                "--ingress",
                "external",
            ]));
            args.push("--target-port".to_string());
            args.push(request.target_port.to_string());
            args.extend(sizing_args(request));
            args.push("--env-vars".to_string());
            args
        }
        (DeploySource::Image(image), DeployAction::Update) => {
            let mut args = strings(&[
                "containerapp",
                "update",
                "--name",
                request.app.as_str(),
                "--resource-group",
                &request.resource_group,
                "--image",
            ]);
            args.push(image.to_string());
            args.extend(sizing_args(request));
            args.push("--set-env-vars".to_string());
            args
        }
        // `up` creates or updates depending on what exists, so the action
        // only changes how the run is reported
        (DeploySource::SourceDir(dir), _) => {
            let mut args = strings(&[
                "containerapp",
                "up",
                "--name",
                request.app.as_str(),
                "--resource-group",
                &request.resource_group,
                "--environment",
                &request.environment,
                "--location",
                &request.location,
                "--source",
            ]);
            args.push(dir.display().to_string());
            args.extend(strings(&[
                "--registry-server",
                &request.registry_server,
                "--ingress",
                "external",
            ]));
            args.push("--target-port".to_string());
            args.push(request.target_port.to_string());
            args.push("--env-vars".to_string());
            args
        }
    };

    args.extend(request.env.iter().map(|(k, v)| format!("{k}={v}")));
    args.extend(strings(&["--output", "none"]));
    args
}

fn sizing_args(request: &DeployRequest) -> Vec<String> {
    vec![
        "--cpu".to_string(),
        request.cpu.clone(),
        "--memory".to_string(),
        request.memory.clone(),
        "--min-replicas".to_string(),
        request.scale.min_replicas.to_string(),
        "--max-replicas".to_string(),
        request.scale.max_replicas.to_string(),
    ]
}
