//! # Output Formatting
//!
//! Results go to stdout, warnings and errors to stderr.
//!
//! ## Supported Formats
//!
//! - **Text**: one block per address, header line then numbered icon URLs
//! - **JSON**: a single array with one object per address, printed at the end
//! - **JSONL**: one object per line, printed as each address finishes
//!
//! ## Examples
//!
//! Text format:
//! ```text
//! https://example.com -> https://www.example.com/
//! 1. https://www.example.com/favicon-32x32.png
//! 2. https://www.example.com/favicon.ico
//! ```
//!
//! JSON format:
//! ```json
//! [{
//!   "address": "example.com",
//!   "original_url": "https://example.com",
//!   "resolved_url": "https://www.example.com/",
//!   "icons": [{"url": "https://www.example.com/favicon.ico", "source": "domain_root"}],
//!   "diagnostics": []
//! }]
//! ```

mod json;
mod shapes;
mod text;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use json::JsonFormatter;
pub use shapes::AddressOutput;
pub use text::TextFormatter;

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// A single JSON array.
    Json,
    /// JSON Lines format (one JSON object per line).
    Jsonl,
}

impl OutputFormat {
    /// Check if this format is machine-readable (JSON or JSONL).
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Jsonl => write!(f, "jsonl"),
        }
    }
}
