//! Text output formatting

use colored::Colorize;
use faviconurl_core::{Diagnostic, Error};
use std::io::{self, Write};

use super::AddressOutput;

pub struct TextFormatter;

impl TextFormatter {
    /// Write one address block followed by a blank line.
    ///
    /// The header is the normalized address, or `original -> resolved` when
    /// discovery moved to another URL. An unusable address prints as given.
    pub fn write_address<W: Write>(out: &mut W, output: &AddressOutput) -> io::Result<()> {
        match (&output.original_url, &output.resolved_url) {
            (Some(original), Some(resolved)) if original != resolved => {
                writeln!(out, "{original} -> {resolved}")?;
            },
            (Some(original), _) => writeln!(out, "{original}")?,
            (None, _) => writeln!(out, "{}", output.address)?,
        }

        for (i, icon) in output.icons.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, icon.url)?;
        }
        writeln!(out)
    }

    /// A non-fatal problem, for stderr.
    pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
        format!("{} {diagnostic}", "warning:".yellow().bold())
    }

    /// An address-level failure, for stderr.
    pub fn format_error(address: &str, error: &Error) -> String {
        format!("{} {address}: {error}", "Error:".red().bold())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use faviconurl_core::{Discovery, Icon, IconSource};

    fn render(output: &AddressOutput) -> String {
        let mut buf = Vec::new();
        TextFormatter::write_address(&mut buf, output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn discovery(original: &str, resolved: &str, urls: &[&str]) -> Discovery {
        Discovery {
            original_url: original.to_string(),
            resolved_url: resolved.to_string(),
            icons: urls
                .iter()
                .map(|url| Icon {
                    url: (*url).to_string(),
                    source: IconSource::LinkTag,
                })
                .collect(),
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_numbered_icons_under_plain_header() {
        let output = AddressOutput::from_discovery(
            "a.com",
            discovery(
                "https://a.com",
                "https://a.com",
                &["https://a.com/f.png", "https://a.com/favicon.ico"],
            ),
        );
        assert_eq!(
            render(&output),
            "https://a.com\n1. https://a.com/f.png\n2. https://a.com/favicon.ico\n\n"
        );
    }

    #[test]
    fn test_header_shows_rewrite() {
        let output = AddressOutput::from_discovery(
            "a.com",
            discovery("https://a.com", "https://www.a.com/", &[]),
        );
        assert_eq!(render(&output), "https://a.com -> https://www.a.com/\n\n");
    }

    #[test]
    fn test_unusable_address_prints_raw_token() {
        let output =
            AddressOutput::from_error("ftp://a.com", &Error::UnsupportedScheme("ftp".into()));
        assert_eq!(render(&output), "ftp://a.com\n\n");
    }

    #[test]
    fn test_stderr_lines_mention_context() {
        colored::control::set_override(false);
        let err = Error::UnsupportedScheme("ftp".into());
        assert_eq!(
            TextFormatter::format_error("ftp://a.com", &err),
            "Error: ftp://a.com: URL scheme must be HTTP or HTTPS, got 'ftp'"
        );
        let diagnostic = Diagnostic::from_error(faviconurl_core::Stage::Manifest, &err);
        assert!(TextFormatter::format_diagnostic(&diagnostic).starts_with("warning: manifest: "));
    }
}
