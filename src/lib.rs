// ABOUTME: Library root for launchpad - exposes the deployment pipeline for testing.
// ABOUTME: The main binary is in main.rs.

pub mod build;
pub mod cloud;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod provision;
pub mod types;
pub mod verify;
