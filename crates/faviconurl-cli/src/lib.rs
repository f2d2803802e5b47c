//! faviconurl CLI - find every favicon URL a site advertises
//!
//! Parses the invocation, sets up logging and configuration, then hands the
//! addresses to the discovery command.

use anyhow::Result;
use clap::Parser;
use faviconurl_core::Discoverer;

mod cli;
mod commands;
mod output;
mod utils;

use cli::Cli;
use utils::{initialize_logging, resolve_config};

/// Execute the faviconurl CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging or configuration cannot be initialized, or
/// if stdout cannot be written. Per-address failures are reported and do
/// not produce an error.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = resolve_config(&cli)?;
    let discoverer = Discoverer::new(&config)?;

    commands::discover::execute(&discoverer, &cli.addresses, cli.format, cli.quiet).await
}
