// ABOUTME: Remote image build with source-build fallback.
// ABOUTME: Locates the build context up front and turns build failures into a routing decision.

mod builder;
mod context;
mod outcome;

pub use builder::ImageBuilder;
pub use context::{BuildContext, PreflightError};
pub use outcome::{BuildOutcome, BuildStrategy};
