// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::diagnostics::Warning;
use crate::pipeline::RunReport;
use crate::verify::HealthReport;
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only the summary)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, warning: &Warning) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Warning: {}", warning.message);
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "warning",
                    message: &warning.message,
                    duration_secs: None,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.duration(),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print the final summary of a finished run.
    ///
    /// The API key is shown to humans only; the JSON result never carries it.
    pub fn summary(&self, report: &RunReport) {
        for warning in &report.warnings {
            self.warning(warning);
        }

        if self.mode == OutputMode::Json {
            let event = ResultEvent {
                event: "result",
                report,
                duration_secs: self.duration(),
            };
            if let Ok(json) = serde_json::to_string(&event) {
                println!("{json}");
            }
            return;
        }

        for line in summary_lines(report) {
            println!("{line}");
        }

        if self.mode == OutputMode::Normal && self.start_time.is_some() {
            println!("Finished in {:.1}s", self.elapsed_secs());
        }
    }
}

/// Human summary lines for a finished run.
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Deployed {} ({}, {})",
        report.app,
        report.action,
        match &report.image {
            Some(image) => format!("image {image}"),
            None => "built from source".to_string(),
        }
    )];

    match &report.links {
        Some(links) => {
            lines.push(format!("  URL:    {}", links.url));
            if let Some(key) = &report.api_key {
                lines.push(format!("  API key: {key}"));
            }
            lines.push(format!("  Health: {}", links.health));
            lines.push(format!("  Tools:  {}", links.tools));
        }
        None => lines.push("  URL:    (not available)".to_string()),
    }

    if let Some(health) = &report.health {
        lines.push(format!("  Status: {}", describe_health(health)));
    }

    lines
}

fn describe_health(health: &HealthReport) -> String {
    match health {
        HealthReport::Healthy { code } => format!("healthy (HTTP {code})"),
        HealthReport::Unhealthy { code } => format!("unhealthy (HTTP {code})"),
        HealthReport::Unreachable { reason } => format!("unreachable ({reason})"),
        HealthReport::NotVerified { reason } => format!("not verified ({reason})"),
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct ResultEvent<'a> {
    event: &'a str,
    report: &'a RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
