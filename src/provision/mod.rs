// ABOUTME: Idempotent provisioning of the resources a container app depends on.
// ABOUTME: Exposes tri-state existence checks and the ensure operations built on them.

mod error;
mod existence;
mod provisioner;

pub use error::ProvisioningError;
pub use existence::{Existence, ResourceDescriptor};
pub use provisioner::Provisioner;
