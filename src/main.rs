// ABOUTME: Entry point for the launchpad CLI application.
// ABOUTME: Parses arguments, installs logging and maps the run result to an exit code.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use launchpad::output::{Output, OutputMode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = commands::deploy(&cli.dir, cli.skip_health_check, output).await {
        std::process::exit(e.exit_code());
    }
}
