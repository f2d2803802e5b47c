//! Configuration for fetching and discovery.
//!
//! Configuration is stored in TOML format and supports environment variable
//! overrides. Every field has a default, so a missing file or a partial file
//! is fine.
//!
//! ## Resolution Order
//!
//! 1. Built-in defaults
//! 2. Config file: `FAVICONURL_CONFIG` if set, otherwise `config.toml` in the
//!    platform config directory
//! 3. Environment variables: `FAVICONURL_TIMEOUT_SECS`,
//!    `FAVICONURL_MAX_REDIRECTS`, `FAVICONURL_USER_AGENT`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [fetch]
//! timeout_secs = 10
//! max_redirects = 5
//! user_agent = "my-crawler/1.0"
//!
//! [discovery]
//! manifest_content_types = ["application/json", "application/manifest+json"]
//! domain_root_fallback = true
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FAVICONURL_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP behaviour.
    pub fetch: FetchConfig,
    /// Discovery pipeline behaviour.
    pub discovery: DiscoveryConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds. `0` disables the timeout.
    pub timeout_secs: u64,

    /// Maximum number of redirect hops followed for a single fetch.
    pub max_redirects: usize,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_redirects: 10,
            user_agent: concat!("faviconurl/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Request timeout, or `None` when disabled.
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_secs))
        }
    }
}

/// Discovery pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Media types accepted for the page body.
    pub page_content_types: Vec<String>,

    /// Media types accepted for web-app manifest bodies.
    pub manifest_content_types: Vec<String>,

    /// Whether to check `/favicon.ico` at the domain root.
    pub domain_root_fallback: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            page_content_types: vec!["text/html".to_string()],
            manifest_content_types: vec!["application/json".to_string()],
            domain_root_fallback: true,
        }
    }
}

impl Config {
    /// Load configuration from `FAVICONURL_CONFIG` or the default location,
    /// then apply environment overrides.
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => Self::config_path()?,
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply `FAVICONURL_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FAVICONURL_TIMEOUT_SECS") {
            self.fetch.timeout_secs = value.trim().parse().map_err(|_| {
                Error::Config(format!("FAVICONURL_TIMEOUT_SECS must be an integer, got '{value}'"))
            })?;
        }
        if let Some(value) = lookup("FAVICONURL_MAX_REDIRECTS") {
            self.fetch.max_redirects = value.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "FAVICONURL_MAX_REDIRECTS must be an integer, got '{value}'"
                ))
            })?;
        }
        if let Some(value) = lookup("FAVICONURL_USER_AGENT") {
            if !value.trim().is_empty() {
                self.fetch.user_agent = value;
            }
        }
        Ok(())
    }

    /// Platform config file location.
    ///
    /// - Linux: `~/.config/faviconurl/config.toml`
    /// - macOS: `~/Library/Application Support/dev.faviconurl.faviconurl/config.toml`
    /// - Windows: `%APPDATA%\faviconurl\faviconurl\config\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "faviconurl", "faviconurl")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.fetch.max_redirects, 10);
        assert!(config.fetch.user_agent.starts_with("faviconurl/"));
        assert_eq!(config.discovery.page_content_types, vec!["text/html"]);
        assert_eq!(
            config.discovery.manifest_content_types,
            vec!["application/json"]
        );
        assert!(config.discovery.domain_root_fallback);
    }

    #[test]
    fn test_timeout_zero_disables() {
        let mut fetch = FetchConfig::default();
        assert_eq!(fetch.timeout(), Some(Duration::from_secs(30)));
        fetch.timeout_secs = 0;
        assert_eq!(fetch.timeout(), None);
    }

    #[test]
    fn test_config_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetch]\nmax_redirects = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.fetch.max_redirects, 3);
        assert_eq!(config.fetch.timeout_secs, 30);
        assert!(config.discovery.domain_root_fallback);
    }

    #[test]
    fn test_config_parse_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetch\ntimeout_secs = ").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FAVICONURL_TIMEOUT_SECS", "7"),
            ("FAVICONURL_MAX_REDIRECTS", " 2 "),
            ("FAVICONURL_USER_AGENT", "tester/1.0"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.fetch.timeout_secs, 7);
        assert_eq!(config.fetch.max_redirects, 2);
        assert_eq!(config.fetch.user_agent, "tester/1.0");
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| {
            (key == "FAVICONURL_MAX_REDIRECTS").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
