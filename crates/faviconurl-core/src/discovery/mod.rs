//! Favicon discovery for web addresses.
//!
//! ## Quick Start
//!
//! ```no_run
//! use faviconurl_core::{Config, discovery::Discoverer};
//!
//! # async fn example() -> faviconurl_core::Result<()> {
//! let discoverer = Discoverer::new(&Config::default())?;
//! let discovery = discoverer.discover_address("example.com").await?;
//!
//! for (i, url) in discovery.icon_urls().enumerate() {
//!     println!("{}. {url}", i + 1);
//! }
//! for diagnostic in &discovery.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Emission Order
//!
//! Icons come out in document order of the `<link>`/`<meta>` elements that
//! produced them, with each manifest's icons inserted where its
//! `<link rel="manifest">` appeared. The domain-root `/favicon.ico` is
//! always last. Duplicates are kept.

pub mod address;
pub mod links;
pub mod manifest;
pub mod probe;

pub use address::normalize_address;
pub use links::{extract_links, parse_links, rel_kind};
pub use manifest::{Manifest, ManifestIcon, fetch_manifest_icons, manifest_icons, parse_manifest};
pub use probe::{Discoverer, apply_canonical, domain_root_url};
