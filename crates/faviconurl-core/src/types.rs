//! Data types shared across the discovery pipeline.

use serde::Serialize;

use crate::diagnostics::Diagnostic;
use crate::uri::Reference;

/// What a classified link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// An icon image.
    Icon,
    /// The page's authoritative URL.
    Canonical,
    /// A web-app manifest listing further icons.
    Manifest,
}

/// A classified reference found in page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Classification from `rel` or `name`.
    pub kind: LinkKind,
    /// Possibly relative until resolved against the working URL.
    pub target: Reference,
    /// Element the link came from (`LinkTag` or `MetaTag`).
    pub source: IconSource,
}

/// Where an icon URL was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSource {
    /// `<link rel="icon">` and the apple-touch variants.
    LinkTag,
    /// `<meta name="og:image">` or `<meta name="twitter:image">`.
    MetaTag,
    /// An entry in a web-app manifest's `icons` array.
    Manifest,
    /// `/favicon.ico` at the domain root.
    DomainRoot,
}

/// A discovered icon URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    /// Absolute URL string.
    pub url: String,
    /// How it was found.
    pub source: IconSource,
}

/// Everything learned about a single address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Normalized input address.
    pub original_url: String,
    /// Working URL after redirects and canonical rewriting.
    pub resolved_url: String,
    /// Icons in emission order: markup (manifests expanded in place), then
    /// the domain-root fallback. Duplicates are kept.
    pub icons: Vec<Icon>,
    /// Non-fatal problems, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
}

impl Discovery {
    /// Whether the working URL moved away from the input address.
    pub fn redirected(&self) -> bool {
        self.original_url != self.resolved_url
    }

    /// Icon URLs in emission order.
    pub fn icon_urls(&self) -> impl Iterator<Item = &str> {
        self.icons.iter().map(|icon| icon.url.as_str())
    }
}
