// ABOUTME: Result of the deploy stage.
// ABOUTME: Records the action taken, the source deployed, and the endpoint once resolved.

use super::{DeployAction, DeploySource};
use crate::types::Endpoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub action: DeployAction,
    pub source: DeploySource,
    /// Filled in once the ingress hostname is looked up; `None` until then or if unresolved.
    pub endpoint: Option<Endpoint>,
    pub success: bool,
}
