// ABOUTME: Deploy command implementation.
// ABOUTME: Reads the environment once, wires the az CLI and HTTP probe, and prints the outcome.

use launchpad::cloud::AzCli;
use launchpad::config::{ConfigError, Settings};
use launchpad::error::Result;
use launchpad::output::Output;
use launchpad::pipeline::Orchestrator;
use launchpad::verify::HttpProbe;
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Deploy the project in `dir`.
///
/// Errors are printed here; the caller only maps them to an exit code.
pub async fn deploy(dir: &Path, skip_health_check: bool, mut output: Output) -> Result<()> {
    output.start_timer();

    let result = run(dir, skip_health_check, &output).await;
    if let Err(e) = &result {
        output.error(&format!("{} (stage: {})", e, e.stage()));
    }
    result
}

async fn run(dir: &Path, skip_health_check: bool, output: &Output) -> Result<()> {
    let vars: HashMap<String, String> = env::vars().collect();

    let load_settings = |dir: &Path| -> std::result::Result<Settings, ConfigError> {
        let mut settings = Settings::discover(dir)?;
        if skip_health_check {
            settings.health.enabled = false;
        }
        Ok(settings)
    };

    let client = AzCli::new();
    let probe = HttpProbe::new();
    let report = Orchestrator::new(&client, &probe, output)
        .run(&vars, dir, load_settings)
        .await?;

    output.summary(&report);
    Ok(())
}
