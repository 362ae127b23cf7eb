// ABOUTME: Run orchestration using the type state pattern.
// ABOUTME: Exports state markers, the Run struct, the end-to-end orchestrator and its report.

mod orchestrator;
mod report;
mod run;
mod state;
mod transitions;

pub use orchestrator::Orchestrator;
pub use report::{RunReport, SummaryLinks};
pub use run::Run;
pub use state::{BuildAttempted, ConfigValidated, Deployed, HealthChecked, ResourcesEnsured, Stage};
