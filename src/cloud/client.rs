// ABOUTME: Cloud client trait consumed by the provisioner, builder, deployer and verifier.
// ABOUTME: Existence checks distinguish a genuine not-found (Ok(false)) from a failed check (Err).

use super::error::CloudError;
use super::types::{BuildRequest, DeployRequest, ResourceTarget};
use crate::types::AppName;
use async_trait::async_trait;

/// Operations against the cloud control plane.
///
/// Every call is attempted once; implementations must not retry.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Check whether a resource exists.
    ///
    /// Returns `Ok(false)` only when the control plane positively reports the
    /// resource as absent. Transport, auth and parse failures are errors.
    async fn exists(&self, target: &ResourceTarget) -> Result<bool, CloudError>;

    /// Create a resource.
    async fn create(&self, target: &ResourceTarget) -> Result<(), CloudError>;

    /// Check whether a container app exists in the resource group.
    async fn app_exists(&self, app: &AppName, resource_group: &str) -> Result<bool, CloudError>;

    /// Build an image remotely and push it to the registry.
    async fn build_image(&self, request: &BuildRequest) -> Result<(), CloudError>;

    /// Create or update the container app.
    async fn deploy_app(&self, request: &DeployRequest) -> Result<(), CloudError>;

    /// Public ingress FQDN of the app, `None` when no ingress hostname is assigned.
    async fn app_fqdn(
        &self,
        app: &AppName,
        resource_group: &str,
    ) -> Result<Option<String>, CloudError>;
}
