//! Effective configuration for a run.
//!
//! Precedence, lowest to highest: built-in defaults, the config file
//! (`--config`/`FAVICONURL_CONFIG` or the platform location), `FAVICONURL_*`
//! environment variables, then command-line flags.

use anyhow::{Context, Result};
use faviconurl_core::Config;

use crate::cli::Cli;

/// Load configuration and apply flag overrides.
///
/// # Errors
///
/// Fails when the config file is malformed or an environment override does
/// not parse.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            config.apply_env_overrides()?;
            config
        },
        None => Config::load().context("loading config")?,
    };
    apply_flags(&mut config, cli);
    Ok(config)
}

fn apply_flags(config: &mut Config, cli: &Cli) {
    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if let Some(max_redirects) = cli.max_redirects {
        config.fetch.max_redirects = max_redirects;
    }
    if cli.no_fallback {
        config.discovery.domain_root_fallback = false;
    }
}
