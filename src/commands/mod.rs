// ABOUTME: Command module aggregator for the launchpad CLI.
// ABOUTME: Re-exports the deploy command handler.

mod deploy;

pub use deploy::deploy;
