// ABOUTME: Final report of a finished run.
// ABOUTME: Serialized as the machine-readable result; also drives the human summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::build::BuildStrategy;
use crate::config::Settings;
use crate::deploy::DeployAction;
use crate::diagnostics::Warning;
use crate::provision::ResourceDescriptor;
use crate::types::{AppName, Endpoint, ImageRef};
use crate::verify::HealthReport;

/// Outcome of a run that reached `Done`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub app: AppName,
    pub resource_group: String,
    pub action: DeployAction,
    pub strategy: BuildStrategy,
    /// Pushed image; absent when the platform built from source.
    pub image: Option<ImageRef>,
    pub resources: Vec<ResourceDescriptor>,
    pub endpoint: Option<Endpoint>,
    /// `None` when verification was skipped.
    pub health: Option<HealthReport>,
    pub links: Option<SummaryLinks>,
    pub warnings: Vec<Warning>,
    /// Shown in the human summary only.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Number of resources this run created.
    pub fn created_count(&self) -> usize {
        self.resources.iter().filter(|r| r.created).count()
    }
}

/// Direct links into the deployed service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLinks {
    pub url: String,
    pub health: String,
    pub tools: String,
}

impl SummaryLinks {
    pub fn new(endpoint: &Endpoint, settings: &Settings) -> Self {
        Self {
            url: endpoint.url(),
            health: endpoint.join(&settings.health.path),
            tools: endpoint.join(&settings.tools_path),
        }
    }
}
