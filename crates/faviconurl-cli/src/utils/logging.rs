//! Logging initialization and configuration.
//!
//! This module handles setting up the tracing subscriber and color control
//! based on CLI flags and environment variables.

use anyhow::Result;
use colored::control as color_control;
use is_terminal::IsTerminal;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Pick the log level for the given flags.
///
/// Machine-readable output drops to errors only, unless verbose/debug was
/// explicitly requested. `--debug` goes down to trace, which includes every
/// request sent and transport-level events.
pub fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::TRACE
    } else if cli.verbose {
        Level::DEBUG
    } else if cli.quiet || cli.format.is_machine_readable() {
        Level::ERROR
    } else {
        Level::WARN
    }
}

/// Whether colored output should be disabled.
pub fn colors_disabled(cli: &Cli, env_no_color: bool, stderr_is_terminal: bool) -> bool {
    cli.no_color || env_no_color || cli.format.is_machine_readable() || !stderr_is_terminal
}

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs always go to stderr so stdout carries only results.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let env_no_color = std::env::var_os("NO_COLOR").is_some();
    if colors_disabled(cli, env_no_color, std::io::stderr().is_terminal()) {
        color_control::set_override(false);
    }
    Ok(())
}
