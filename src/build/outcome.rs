// ABOUTME: Result of the build stage.
// ABOUTME: Either a pushed image or a deferral to a platform-side source build.

use crate::types::ImageRef;
use serde::Serialize;

/// How the deploy stage gets its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStrategy {
    /// Image was built and pushed to the registry ahead of deploy.
    RemoteBuild,
    /// The hosting platform builds from source during deploy.
    DeferredSourceBuild,
}

/// Outcome of the single remote build attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Remote { image: ImageRef },
    DeferredSource { reason: String },
}

impl BuildOutcome {
    pub fn strategy(&self) -> BuildStrategy {
        match self {
            BuildOutcome::Remote { .. } => BuildStrategy::RemoteBuild,
            BuildOutcome::DeferredSource { .. } => BuildStrategy::DeferredSourceBuild,
        }
    }

    /// The pushed image, present only for remote builds.
    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            BuildOutcome::Remote { image } => Some(image),
            BuildOutcome::DeferredSource { .. } => None,
        }
    }
}
