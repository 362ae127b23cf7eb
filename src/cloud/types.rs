// ABOUTME: Request types shared between orchestration stages and cloud clients.
// ABOUTME: Resource targets, build requests and deploy requests.

use crate::config::ScaleSettings;
use crate::types::{AppName, ImageRef, RegistryName};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Kind of infrastructure resource the provisioner manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    ResourceGroup,
    Environment,
    Registry,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::ResourceGroup => "resource group",
            ResourceKind::Environment => "container apps environment",
            ResourceKind::Registry => "container registry",
        };
        write!(f, "{label}")
    }
}

/// A resource to check or create, with its parent scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTarget {
    ResourceGroup {
        name: String,
        location: String,
    },
    Environment {
        name: String,
        resource_group: String,
        location: String,
    },
    Registry {
        name: RegistryName,
        resource_group: String,
        location: String,
        sku: String,
    },
}

impl ResourceTarget {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceTarget::ResourceGroup { .. } => ResourceKind::ResourceGroup,
            ResourceTarget::Environment { .. } => ResourceKind::Environment,
            ResourceTarget::Registry { .. } => ResourceKind::Registry,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResourceTarget::ResourceGroup { name, .. } => name,
            ResourceTarget::Environment { name, .. } => name,
            ResourceTarget::Registry { name, .. } => name.as_str(),
        }
    }
}

/// A remote build-and-push of the service image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub registry: RegistryName,
    pub image: ImageRef,
    pub context_dir: PathBuf,
    pub dockerfile: PathBuf,
}

/// Whether the deploy call creates a new app or updates the existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployAction {
    Create,
    Update,
}

impl fmt::Display for DeployAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployAction::Create => write!(f, "create"),
            DeployAction::Update => write!(f, "update"),
        }
    }
}

/// What the single deploy call runs: a prebuilt image or a source directory
/// the platform builds at deploy time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploySource {
    Image(ImageRef),
    SourceDir(PathBuf),
}

/// Everything the deploy call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub action: DeployAction,
    pub app: AppName,
    pub resource_group: String,
    pub environment: String,
    pub location: String,
    pub source: DeploySource,
    /// Login server of the target registry.
    pub registry_server: String,
    /// Container port exposed through external ingress.
    pub target_port: u16,
    /// Environment variables injected into the workload.
    pub env: Vec<(String, String)>,
    pub cpu: String,
    pub memory: String,
    pub scale: ScaleSettings,
}
