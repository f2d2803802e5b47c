//! Icon-related link extraction from HTML.
//!
//! Extraction runs in two passes: an iterative pre-order walk yields every
//! `<link>` and `<meta>` element in document order, then each element is
//! classified on its own. Every `href` (or `<meta>` `content`) present is
//! parsed, and a malformed one produces a [`Diagnostic`] whatever the
//! element's role. Well-formed elements that do not describe an icon, a
//! canonical URL or a manifest produce nothing.
//!
//! ```rust
//! use faviconurl_core::discovery::parse_links;
//! use faviconurl_core::LinkKind;
//!
//! let report = parse_links(r#"
//!     <link rel="shortcut icon" href="/favicon.png">
//!     <link rel="stylesheet" href="/site.css">
//!     <meta name="og:image" content="https://cdn.example.com/og.png">
//! "#);
//! let kinds: Vec<_> = report.value.iter().map(|link| link.kind).collect();
//! assert_eq!(kinds, vec![LinkKind::Icon, LinkKind::Icon]);
//! assert!(report.diagnostics.is_empty());
//! ```

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::diagnostics::{Diagnostic, Report, Stage};
use crate::types::{IconSource, Link, LinkKind};
use crate::uri::Reference;
use crate::{Error, Result};

/// `rel` tokens that mark a `<link>` as an icon.
pub const ICON_REL_TOKENS: &[&str] = &["icon", "apple-touch-icon", "apple-touch-icon-precomposed"];

/// `<meta name>` values whose `content` is an image URL.
pub const IMAGE_META_NAMES: &[&str] = &["og:image", "twitter:image"];

/// Parse `html` and extract its links.
pub fn parse_links(html: &str) -> Report<Vec<Link>> {
    extract_links(&Html::parse_document(html))
}

/// Extract classified links from a parsed document, in document order.
pub fn extract_links(document: &Html) -> Report<Vec<Link>> {
    let mut report = Report::new(Vec::new());

    for outcome in candidates(document).filter_map(classify) {
        match outcome {
            Ok(link) => report.value.push(link),
            Err(diagnostic) => {
                debug!(%diagnostic, "skipping malformed link");
                report.push(diagnostic);
            },
        }
    }

    report
}

/// Every `<link>` and `<meta>` element, depth-first pre-order.
fn candidates(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| matches!(element.value().name(), "link" | "meta"))
}

fn classify(element: ElementRef<'_>) -> Option<std::result::Result<Link, Diagnostic>> {
    let attrs = element.value();
    let (url_attr, source) = match attrs.name() {
        "link" => ("href", IconSource::LinkTag),
        "meta" => ("content", IconSource::MetaTag),
        _ => return None,
    };

    // A present URL attribute is always parsed, qualifying element or not.
    let target = match parse_link_value(attrs.attr(url_attr)?) {
        Ok(target) => target,
        Err(err) => return Some(Err(Diagnostic::from_error(Stage::Link, &err))),
    };

    let kind = match source {
        IconSource::MetaTag => IMAGE_META_NAMES
            .contains(&attrs.attr("name")?)
            .then_some(LinkKind::Icon)?,
        _ => rel_kind(attrs.attr("rel")?)?,
    };

    Some(Ok(Link {
        kind,
        target,
        source,
    }))
}

/// Map a `rel` attribute value to a link kind.
///
/// `canonical`, `icon`, and `manifest` match whole values. Anything else is
/// split on spaces and is an icon when any token is in [`ICON_REL_TOKENS`].
pub fn rel_kind(rel: &str) -> Option<LinkKind> {
    match rel {
        "canonical" => Some(LinkKind::Canonical),
        "icon" => Some(LinkKind::Icon),
        "manifest" => Some(LinkKind::Manifest),
        other => other
            .split(' ')
            .any(|token| ICON_REL_TOKENS.contains(&token))
            .then_some(LinkKind::Icon),
    }
}

/// Parse an attribute or manifest URL value, surrounding ASCII whitespace
/// stripped.
pub(crate) fn parse_link_value(raw: &str) -> Result<Reference> {
    let value = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    Reference::parse(value).map_err(|err| Error::LinkParse {
        value: raw.to_string(),
        reason: match err {
            Error::InvalidUrl(reason) => reason,
            other => other.to_string(),
        },
    })
}
