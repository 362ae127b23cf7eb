// ABOUTME: Cloud control-plane interface used by every orchestration stage.
// ABOUTME: Defines the CloudClient trait, its request types, and the az CLI adapter.

mod az;
mod client;
mod error;
mod types;

pub use az::AzCli;
pub use client::CloudClient;
pub use error::CloudError;
pub use types::{
    BuildRequest, DeployAction, DeployRequest, DeploySource, ResourceKind, ResourceTarget,
};
