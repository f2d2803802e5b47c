//! URI references and the literal resolution rule used for icon links.
//!
//! Icon links are frequently relative (`icon.png`, `/favicon.png`,
//! `//cdn.example.com/i.png`), so the pipeline needs a type that can hold a
//! reference with any of scheme, host, or path missing and expose them
//! separately. [`Reference`] is that type.
//!
//! ## Resolution
//!
//! [`resolve`] is deliberately not RFC 3986 resolution. A path that does not
//! start with `/` is appended to the base path with a single `/` in between,
//! with no dot-segment removal and no trimming of the base's last segment:
//!
//! ```rust
//! use faviconurl_core::uri::{Reference, resolve};
//!
//! let base = Reference::parse("https://a.com/dir")?;
//! let icon = Reference::parse("icon.png")?;
//! assert_eq!(resolve(&base, &icon).to_string(), "https://a.com/dir/icon.png");
//!
//! let root = Reference::parse("https://a.com/")?;
//! assert_eq!(resolve(&root, &icon).to_string(), "https://a.com//icon.png");
//! # Ok::<(), faviconurl_core::Error>(())
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A parsed, possibly relative, URI reference.
///
/// Components are kept in their raw (still percent-encoded) form. The host
/// includes the port when one was given, so `127.0.0.1:8080` is a single
/// host value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Reference {
    scheme: String,
    opaque: Option<String>,
    userinfo: Option<String>,
    host: String,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Reference {
    /// Parse a reference using the generic component split.
    ///
    /// Rejects ASCII control characters, malformed percent escapes,
    /// non-numeric ports, and a colon inside the first segment of a
    /// reference without a scheme.
    pub fn parse(input: &str) -> Result<Self> {
        if input.chars().any(|c| c.is_ascii_control()) {
            return Err(invalid(input, "invalid control character in URL"));
        }

        let mut reference = Self::default();

        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (input, None),
        };
        if let Some(fragment) = fragment {
            check_escapes(input, fragment)?;
            reference.fragment = Some(fragment.to_string());
        }

        let (scheme, rest) = split_scheme(input, rest)?;
        reference.scheme = scheme.to_ascii_lowercase();

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };
        if let Some(query) = query {
            check_escapes(input, query)?;
            reference.query = Some(query.to_string());
        }

        if !rest.starts_with('/') {
            if !reference.scheme.is_empty() {
                if !rest.is_empty() {
                    reference.opaque = Some(rest.to_string());
                }
                return Ok(reference);
            }
            let first_segment = rest.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return Err(invalid(
                    input,
                    "first path segment in URL cannot contain colon",
                ));
            }
        }

        let mut path = rest;
        if (!reference.scheme.is_empty() || !rest.starts_with("///")) && rest.starts_with("//") {
            let after = &rest[2..];
            let (authority, remainder) = after
                .find('/')
                .map_or((after, ""), |idx| after.split_at(idx));
            let (userinfo, host) = parse_authority(input, authority)?;
            reference.userinfo = userinfo;
            reference.host = host;
            path = remainder;
        }

        check_escapes(input, path)?;
        reference.path = path.to_string();
        Ok(reference)
    }

    /// Lower-cased scheme, empty when the reference has none.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host including any port, empty when the reference has none.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Raw path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query component, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Raw fragment component, without the leading `#`.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether this is an opaque reference such as `data:` or `mailto:`.
    pub const fn is_opaque(&self) -> bool {
        self.opaque.is_some()
    }

    /// Whether both a scheme and a host are present.
    pub fn is_absolute(&self) -> bool {
        self.opaque.is_none() && !self.scheme.is_empty() && !self.host.is_empty()
    }

    /// Replace the scheme.
    pub fn set_scheme(&mut self, scheme: &str) {
        self.scheme = scheme.to_ascii_lowercase();
    }

    /// Replace the host (and port).
    pub fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    /// Replace the path.
    pub fn set_path(&mut self, path: &str) {
        self.path = path.to_string();
    }
}

/// Resolve `reference` against `base` with literal path concatenation.
///
/// - a path not starting with `/` becomes `base.path + "/" + path`
/// - a missing scheme is taken from `base`
/// - a missing host is taken from `base`
///
/// Opaque references resolve to themselves. `base` is never modified.
pub fn resolve(base: &Reference, reference: &Reference) -> Reference {
    if reference.is_opaque() {
        return reference.clone();
    }

    let mut resolved = reference.clone();
    if !resolved.path.starts_with('/') {
        resolved.path = format!("{}/{}", base.path, resolved.path);
    }
    if resolved.scheme.is_empty() {
        resolved.scheme.clone_from(&base.scheme);
    }
    if resolved.host.is_empty() {
        resolved.host.clone_from(&base.host);
    }
    resolved
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }

        if let Some(opaque) = &self.opaque {
            out.push_str(opaque);
        } else {
            if !self.scheme.is_empty() || !self.host.is_empty() || self.userinfo.is_some() {
                if !self.host.is_empty() || !self.path.is_empty() || self.userinfo.is_some() {
                    out.push_str("//");
                }
                if let Some(userinfo) = &self.userinfo {
                    out.push_str(userinfo);
                    out.push('@');
                }
                out.push_str(&self.host);
            }

            if !self.path.is_empty() && !self.path.starts_with('/') && !self.host.is_empty() {
                out.push('/');
            }
            if out.is_empty() {
                let first_segment = self.path.split('/').next().unwrap_or_default();
                if first_segment.contains(':') {
                    out.push_str("./");
                }
            }
            escape_into(&mut out, &self.path);
        }

        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }

        if let Some(fragment) = self.fragment.as_deref().filter(|f| !f.is_empty()) {
            out.push('#');
            escape_into(&mut out, fragment);
        }

        f.write_str(&out)
    }
}

fn invalid(input: &str, reason: &str) -> Error {
    Error::InvalidUrl(format!("parse {input:?}: {reason}"))
}

/// Split a leading `scheme:` off the reference.
fn split_scheme<'a>(input: &str, raw: &'a str) -> Result<(&'a str, &'a str)> {
    for (idx, byte) in raw.bytes().enumerate() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' => {},
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                if idx == 0 {
                    return Ok(("", raw));
                }
            },
            b':' => {
                if idx == 0 {
                    return Err(invalid(input, "missing protocol scheme"));
                }
                return Ok((&raw[..idx], &raw[idx + 1..]));
            },
            _ => return Ok(("", raw)),
        }
    }
    Ok(("", raw))
}

fn parse_authority(input: &str, authority: &str) -> Result<(Option<String>, String)> {
    let (userinfo, host) = match authority.rfind('@') {
        Some(idx) => (Some(&authority[..idx]), &authority[idx + 1..]),
        None => (None, authority),
    };

    if let Some(userinfo) = userinfo {
        check_escapes(input, userinfo)?;
    }
    check_host(input, host)?;

    Ok((userinfo.map(str::to_string), host.to_string()))
}

fn check_host(input: &str, host: &str) -> Result<()> {
    let port = if host.starts_with('[') {
        let Some(end) = host.find(']') else {
            return Err(invalid(input, "missing ']' in host"));
        };
        &host[end + 1..]
    } else {
        if let Some(bad) = host
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '{' | '}' | '|' | '\\' | '^' | '`'))
        {
            return Err(invalid(
                input,
                &format!("invalid character {bad:?} in host name"),
            ));
        }
        host.rfind(':').map_or("", |idx| &host[idx..])
    };

    if !port.is_empty() {
        let digits = port.strip_prefix(':').unwrap_or("x");
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(
                input,
                &format!("invalid port {port:?} after host"),
            ));
        }
    }

    check_escapes(input, host)
}

fn check_escapes(input: &str, component: &str) -> Result<()> {
    let bytes = component.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            let valid = bytes.len() > idx + 2
                && bytes[idx + 1].is_ascii_hexdigit()
                && bytes[idx + 2].is_ascii_hexdigit();
            if !valid {
                let end = (idx + 3).min(bytes.len());
                let escape = String::from_utf8_lossy(&bytes[idx..end]);
                return Err(invalid(input, &format!("invalid URL escape {escape:?}")));
            }
            idx += 3;
        } else {
            idx += 1;
        }
    }
    Ok(())
}

/// Bytes escaped when rendering a path or fragment: everything except
/// unreserved characters, sub-delims, `:`, `@`, `/`, and `%` so existing
/// escapes pass through.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@')
    .remove(b'/')
    .remove(b'%');

fn escape_into(out: &mut String, component: &str) {
    out.extend(utf8_percent_encode(component, COMPONENT));
}
