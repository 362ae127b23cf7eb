// ABOUTME: Ensure-style operations for resource group, environment and registry.
// ABOUTME: Each checks existence once and creates at most once.

use super::error::ProvisioningError;
use super::existence::{Existence, ResourceDescriptor};
use crate::cloud::{CloudClient, ResourceTarget};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::{AppName, RegistryName};

/// Makes sure the resources an app deploys into exist.
pub struct Provisioner<'a, C> {
    client: &'a C,
}

impl<'a, C: CloudClient> Provisioner<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn ensure_resource_group(
        &self,
        name: &str,
        location: &str,
        diag: &mut Diagnostics,
    ) -> Result<ResourceDescriptor, ProvisioningError> {
        let target = ResourceTarget::ResourceGroup {
            name: name.to_string(),
            location: location.to_string(),
        };
        self.ensure(&target, diag).await
    }

    pub async fn ensure_environment(
        &self,
        name: &str,
        resource_group: &str,
        location: &str,
        diag: &mut Diagnostics,
    ) -> Result<ResourceDescriptor, ProvisioningError> {
        let target = ResourceTarget::Environment {
            name: name.to_string(),
            resource_group: resource_group.to_string(),
            location: location.to_string(),
        };
        self.ensure(&target, diag).await
    }

    pub async fn ensure_registry(
        &self,
        name: &RegistryName,
        resource_group: &str,
        location: &str,
        sku: &str,
        diag: &mut Diagnostics,
    ) -> Result<ResourceDescriptor, ProvisioningError> {
        let target = ResourceTarget::Registry {
            name: name.clone(),
            resource_group: resource_group.to_string(),
            location: location.to_string(),
            sku: sku.to_string(),
        };
        self.ensure(&target, diag).await
    }

    /// Check whether the app already exists. Never creates anything.
    pub async fn check_app_exists(
        &self,
        app: &AppName,
        resource_group: &str,
        diag: &mut Diagnostics,
    ) -> Existence {
        let existence = Existence::from_check(self.client.app_exists(app, resource_group).await);

        if let Existence::CheckFailed { reason } = &existence {
            diag.warn(Warning::existence_check_failed(format!(
                "could not determine whether container app '{}' exists ({}); treating it as new",
                app, reason
            )));
        }

        existence
    }

    /// Check, then create if the resource was not confirmed to exist.
    ///
    /// A failed check is treated like an absence: creation is attempted, and
    /// the ambiguity is recorded as a warning so the log does not claim the
    /// resource was missing.
    async fn ensure(
        &self,
        target: &ResourceTarget,
        diag: &mut Diagnostics,
    ) -> Result<ResourceDescriptor, ProvisioningError> {
        let kind = target.kind();
        let name = target.name();
        let observed = Existence::from_check(self.client.exists(target).await);

        if observed.exists() {
            tracing::info!("{} '{}' already exists", kind, name);
            return Ok(ResourceDescriptor {
                kind,
                name: name.to_string(),
                observed,
                created: false,
            });
        }

        if let Existence::CheckFailed { reason } = &observed {
            diag.warn(Warning::existence_check_failed(format!(
                "could not check whether {} '{}' exists ({}); attempting to create it",
                kind, name, reason
            )));
        } else {
            tracing::info!("{} '{}' not found, creating", kind, name);
        }

        if let Err(e) = self.client.create(target).await {
            return Err(ProvisioningError::create_failed(kind, name, &observed, e));
        }

        tracing::info!("Created {} '{}'", kind, name);
        Ok(ResourceDescriptor {
            kind,
            name: name.to_string(),
            observed,
            created: true,
        })
    }
}
