// ABOUTME: The single deploy call of a run.
// ABOUTME: Chooses create vs update and image vs source, then deploys exactly once.

mod deployer;
mod error;
mod outcome;

pub use crate::cloud::{DeployAction, DeploySource};
pub use deployer::AppDeployer;
pub use error::DeployError;
pub use outcome::DeployOutcome;
