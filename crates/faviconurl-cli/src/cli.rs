//! # CLI Structure and Argument Parsing
//!
//! `faviconurl` takes one or more addresses and prints the icon URLs found
//! for each, in the order they were discovered.
//!
//! ```bash
//! # Bare domains get https://
//! faviconurl example.com
//!
//! # Several addresses, processed one after another
//! faviconurl example.com https://www.rust-lang.org/
//!
//! # Machine-readable output
//! faviconurl example.com --format json | jq '.[0].icons'
//! ```
//!
//! Addresses that cannot be used (bad syntax, non-HTTP scheme) are reported
//! and skipped; they never change the exit status. Only a malformed
//! invocation, such as no addresses at all, exits non-zero.

use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `faviconurl` command
#[derive(Parser, Clone, Debug)]
#[command(name = "faviconurl")]
#[command(version)]
#[command(about = "Discover favicon and site-icon URLs for web addresses", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Addresses to inspect (bare domains or http/https URLs)
    #[arg(value_name = "ADDRESS", required = true, num_args = 1..)]
    pub addresses: Vec<String>,

    /// Show debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Suppress warnings (only show errors)
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show trace logging, including every request and transport events
    #[arg(long)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to a config file
    #[arg(long, value_name = "PATH", env = "FAVICONURL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum redirect hops per request
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<usize>,

    /// Skip the /favicon.ico check at the domain root
    #[arg(long)]
    pub no_fallback: bool,
}
