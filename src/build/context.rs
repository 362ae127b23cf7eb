// ABOUTME: Build context discovery.
// ABOUTME: The project directory and its Dockerfile must exist before any cloud call.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("project directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Dockerfile not found: {0}")]
    DockerfileNotFound(PathBuf),
}

/// Directory sent as build input, plus the Dockerfile inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    dir: PathBuf,
    dockerfile: PathBuf,
}

impl BuildContext {
    /// Locate the build context.
    ///
    /// `dockerfile` is resolved relative to `dir`. Relative `dir` values are
    /// made absolute so the path stays valid for the cloud CLI.
    pub fn discover(dir: &Path, dockerfile: &Path) -> Result<Self, PreflightError> {
        if !dir.is_dir() {
            return Err(PreflightError::DirectoryNotFound(dir.to_path_buf()));
        }

        let dir = std::path::absolute(dir)
            .map_err(|_| PreflightError::DirectoryNotFound(dir.to_path_buf()))?;

        let dockerfile_path = dir.join(dockerfile);
        if !dockerfile_path.is_file() {
            return Err(PreflightError::DockerfileNotFound(dockerfile_path));
        }

        Ok(Self {
            dir,
            dockerfile: dockerfile.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Dockerfile path relative to [`dir`](Self::dir).
    pub fn dockerfile(&self) -> &Path {
        &self.dockerfile
    }
}
