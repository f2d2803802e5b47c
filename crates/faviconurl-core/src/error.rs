//! Error types and handling for faviconurl-core operations.
//!
//! A single [`Error`] enum covers every failure the discovery pipeline can
//! produce. Most of them are non-fatal at the pipeline level: the
//! orchestrator turns them into [`Diagnostic`](crate::Diagnostic)s and keeps
//! going. Only address normalization failures stop work on an address.
//!
//! ## Error Categories
//!
//! - **Address errors**: `invalid_url`, `unsupported_scheme`
//! - **Fetch errors**: `redirect_without_location`, `unexpected_status`,
//!   `too_many_redirects`, `network`
//! - **Body errors**: `unexpected_content_type`, `decode_failure`
//! - **Markup errors**: `link_parse_failure` (always skip-and-continue)
//! - **Configuration errors**: `config`
//!
//! ```rust
//! use faviconurl_core::Error;
//!
//! let err = Error::UnsupportedScheme("ftp".to_string());
//! assert_eq!(err.category(), "unsupported_scheme");
//! ```

use thiserror::Error;

/// The main error type for faviconurl-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// An address or reference could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An address carried a scheme other than `http` or `https`.
    #[error("URL scheme must be HTTP or HTTPS, got '{0}'")]
    UnsupportedScheme(String),

    /// A 3xx response arrived without a usable `Location` header.
    #[error("Location is empty for HTTP status {status} at '{url}'")]
    RedirectWithoutLocation {
        /// URL that produced the redirect.
        url: String,
        /// Redirect status code.
        status: u16,
    },

    /// A response status fell outside the 2xx and 3xx ranges.
    #[error("Invalid HTTP status {status} at '{url}'")]
    UnexpectedStatus {
        /// URL that produced the response.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The redirect chain exceeded the configured hop limit.
    #[error("Too many redirects (limit {limit}) starting at '{url}'")]
    TooManyRedirects {
        /// URL the chain started from.
        url: String,
        /// Hop limit that was exceeded.
        limit: usize,
    },

    /// A response body had a media type the caller does not accept.
    #[error("Unexpected content-type '{content_type}' at '{url}'")]
    UnexpectedContentType {
        /// URL that produced the response.
        url: String,
        /// Media type reported by the server (parameters stripped).
        content_type: String,
    },

    /// A response body could not be decoded (for example malformed JSON).
    #[error("Failed to decode: {0}")]
    Decode(String),

    /// A single `href`, `content`, or manifest `src` value was malformed.
    ///
    /// Always non-fatal: the offending element is skipped.
    #[error("Failed to parse link '{value}': {reason}")]
    LinkParse {
        /// The raw attribute value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Transport-level failure (DNS, connect, TLS, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Get the error category as a stable snake_case identifier.
    ///
    /// Used for diagnostics and machine-readable output.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::UnsupportedScheme(_) => "unsupported_scheme",
            Self::RedirectWithoutLocation { .. } => "redirect_without_location",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::TooManyRedirects { .. } => "too_many_redirects",
            Self::UnexpectedContentType { .. } => "unexpected_content_type",
            Self::Decode(_) => "decode_failure",
            Self::LinkParse { .. } => "link_parse_failure",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
