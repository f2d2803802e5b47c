//! # faviconurl-core
//!
//! Core functionality for faviconurl - discovering every plausible favicon and
//! site-icon URL for a web address.
//!
//! Given a bare domain or a full URL, the pipeline fetches the page while
//! following redirects itself, reads icon-related `<link>` and `<meta>`
//! markup, expands web-app manifests, and checks the conventional
//! `/favicon.ico` at the domain root.
//!
//! ## Architecture
//!
//! - **URI references**: [`uri::Reference`] and the literal [`uri::resolve`] rule
//! - **Fetching**: [`Fetcher`] with an explicit, capped redirect loop
//! - **Discovery**: address normalization, link extraction, manifests, and
//!   the [`discovery::Discoverer`] that sequences them
//! - **Diagnostics**: non-fatal problems travel with results as [`Diagnostic`]s
//! - **Configuration**: TOML settings with environment overrides
//!
//! ## Error Handling
//!
//! Only an unusable address is an error for the caller. Everything after
//! normalization degrades into diagnostics:
//!
//! ```rust
//! use faviconurl_core::{Error, discovery::normalize_address};
//!
//! match normalize_address("ftp://example.com") {
//!     Err(Error::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

/// Configuration for fetching and discovery
pub mod config;
/// Non-fatal diagnostics collected during discovery
pub mod diagnostics;
/// Address normalization, link extraction, manifests, and orchestration
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// HTTP fetching with a manual redirect loop
pub mod fetcher;
/// Core data types
pub mod types;
/// URI references and resolution
pub mod uri;

pub use config::{Config, DiscoveryConfig, FetchConfig};
pub use diagnostics::{Diagnostic, Report, Stage};
pub use discovery::{Discoverer, normalize_address};
pub use error::{Error, Result};
pub use fetcher::{Fetched, Fetcher};
pub use types::{Discovery, Icon, IconSource, Link, LinkKind};
pub use uri::{Reference, resolve};
