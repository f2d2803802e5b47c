//! Turning a raw command-line token into a base URL.

use crate::uri::Reference;
use crate::{Error, Result};

/// Normalize a raw address token into an absolute `http(s)` reference.
///
/// 1. Parse the token; malformed syntax is [`Error::InvalidUrl`].
/// 2. A scheme other than `http`/`https` is [`Error::UnsupportedScheme`].
/// 3. A missing scheme becomes `https`.
/// 4. With no host but a non-empty path (`example.com`), the path is
///    taken as the host and cleared.
///
/// No network access happens here.
///
/// ```rust
/// use faviconurl_core::discovery::normalize_address;
///
/// let url = normalize_address("example.com")?;
/// assert_eq!(url.to_string(), "https://example.com");
///
/// let err = normalize_address("ftp://example.com").unwrap_err();
/// assert_eq!(err.category(), "unsupported_scheme");
/// # Ok::<(), faviconurl_core::Error>(())
/// ```
pub fn normalize_address(raw: &str) -> Result<Reference> {
    let mut url = Reference::parse(raw)?;

    match url.scheme() {
        "http" | "https" => {},
        "" => url.set_scheme("https"),
        other => return Err(Error::UnsupportedScheme(other.to_string())),
    }

    if url.host().is_empty() && !url.path().is_empty() {
        let path = url.path().to_string();
        url.set_host(&path);
        url.set_path("");
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_becomes_https_host() {
        let url = normalize_address("example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "example.com");
        assert_eq!(url.path(), "");
        assert_eq!(url.to_string(), "https://example.com");
    }

    #[test]
    fn test_full_urls_are_kept() {
        let url = normalize_address("http://example.com/about").unwrap();
        assert_eq!(url.to_string(), "http://example.com/about");

        let url = normalize_address("HTTPS://Example.com/").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "Example.com");
    }

    #[test]
    fn test_scheme_relative_address() {
        let url = normalize_address("//example.com/x").unwrap();
        assert_eq!(url.to_string(), "https://example.com/x");
    }

    #[test]
    fn test_bare_domain_with_path_moves_everything_to_host() {
        let url = normalize_address("example.com/blog").unwrap();
        assert_eq!(url.host(), "example.com/blog");
        assert_eq!(url.path(), "");
    }

    #[test]
    fn test_unsupported_scheme() {
        match normalize_address("ftp://example.com") {
            Err(Error::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
        // `host:port` without a scheme reads as scheme `localhost`.
        assert!(matches!(
            normalize_address("localhost:8080"),
            Err(Error::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_invalid_url() {
        let err = normalize_address("http://exa mple.com").unwrap_err();
        assert_eq!(err.category(), "invalid_url");
        let err = normalize_address(":8080").unwrap_err();
        assert_eq!(err.category(), "invalid_url");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for raw in ["example.com", "https://example.com/a", "http://a.b:81/"] {
            let once = normalize_address(raw).unwrap();
            let twice = normalize_address(&once.to_string()).unwrap();
            assert_eq!(once, twice, "input {raw}");
        }
    }
}
