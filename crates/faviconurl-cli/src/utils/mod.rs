//! Shared helpers for the CLI: logging setup and configuration resolution.

pub mod logging;
pub mod settings;

pub use logging::initialize_logging;
pub use settings::resolve_config;
