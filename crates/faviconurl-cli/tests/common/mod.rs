#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

fn config_dir() -> &'static Path {
    static CONFIG_DIR: OnceLock<TempDir> = OnceLock::new();
    CONFIG_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create config dir for tests"))
        .path()
}

/// Path of a config file that never exists, so runs use built-in defaults.
fn absent_config() -> PathBuf {
    config_dir().join("absent.toml")
}

/// Create a configured `faviconurl` command suitable for integration tests.
///
/// The user's own config file and `FAVICONURL_*` overrides are shut out.
#[allow(dead_code)]
pub fn faviconurl_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("faviconurl"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("FAVICONURL_CONFIG", absent_config());
    cmd.env_remove("FAVICONURL_TIMEOUT_SECS");
    cmd.env_remove("FAVICONURL_MAX_REDIRECTS");
    cmd.env_remove("FAVICONURL_USER_AGENT");
    cmd.env("NO_COLOR", "1");
    cmd
}
