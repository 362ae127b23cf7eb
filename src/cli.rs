// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: All flags are optional; deployment targets come from the environment.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Idempotent deployment of a containerized service to Azure Container Apps")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI (only the final summary)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Output as JSON lines for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory containing the Dockerfile
    #[arg(short = 'C', long = "dir", value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Skip the post-deploy health probe
    #[arg(long)]
    pub skip_health_check: bool,
}
