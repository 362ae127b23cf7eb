// ABOUTME: Application-wide fatal error type for launchpad.
// ABOUTME: Each variant aborts the run with exit code 1 and maps to the stage it failed in.

use crate::build::PreflightError;
use crate::config::ConfigError;
use crate::deploy::DeployError;
use crate::pipeline::Stage;
use crate::provision::ProvisioningError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("preflight check failed: {0}")]
    Preflight(#[from] PreflightError),

    #[error("provisioning failed: {0}")]
    Provisioning(#[from] ProvisioningError),

    #[error("deploy failed: {0}")]
    Deploy(#[from] DeployError),
}

impl Error {
    /// The stage the run was trying to reach when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            Error::Config(_) | Error::Preflight(_) => Stage::ConfigValidated,
            Error::Provisioning(_) => Stage::ResourcesEnsured,
            Error::Deploy(_) => Stage::Deployed,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, Error>;
