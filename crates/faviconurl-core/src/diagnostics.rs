//! Non-fatal problems collected alongside pipeline results.
//!
//! Discovery never aborts on a malformed link or a failed manifest fetch.
//! Those problems are recorded as [`Diagnostic`]s and travel with the
//! value in a [`Report`], leaving it to the presentation layer to decide
//! how to show them.

use serde::Serialize;
use std::fmt;

use crate::Error;

/// Pipeline stage a diagnostic was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Fetching the page and reading its markup.
    Page,
    /// Interpreting a single `<link>` or `<meta>` element.
    Link,
    /// Fetching or decoding a web-app manifest.
    Manifest,
    /// Checking `/favicon.ico` at the domain root.
    DomainRoot,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Page => "page",
            Self::Link => "link",
            Self::Manifest => "manifest",
            Self::DomainRoot => "domain root",
        };
        f.write_str(name)
    }
}

/// A non-fatal problem surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where in the pipeline the problem occurred.
    pub stage: Stage,
    /// Error category, see [`Error::category`].
    pub category: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from an error raised at `stage`.
    pub fn from_error(stage: Stage, error: &Error) -> Self {
        Self {
            stage,
            category: error.category(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

/// A value plus the diagnostics produced while computing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<T> {
    /// The primary result.
    pub value: T,
    /// Problems encountered along the way, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Report<T> {
    /// Wrap a value with no diagnostics.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Split into the value and its diagnostics.
    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_carries_category() {
        let err = Error::LinkParse {
            value: "bad\u{0}".to_string(),
            reason: "invalid control character in URL".to_string(),
        };
        let diag = Diagnostic::from_error(Stage::Link, &err);
        assert_eq!(diag.stage, Stage::Link);
        assert_eq!(diag.category, "link_parse_failure");
        assert!(diag.to_string().starts_with("link: "));
    }

    #[test]
    fn test_report_collects_in_order() {
        let mut report = Report::new(vec![1, 2]);
        report.push(Diagnostic::from_error(Stage::Page, &Error::Decode("a".into())));
        report.push(Diagnostic::from_error(
            Stage::Manifest,
            &Error::Decode("b".into()),
        ));
        let (value, diagnostics) = report.into_parts();
        assert_eq!(value, vec![1, 2]);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].stage, Stage::Page);
        assert_eq!(diagnostics[1].stage, Stage::Manifest);
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let names: Vec<String> = [Stage::Page, Stage::Link, Stage::Manifest, Stage::DomainRoot]
            .iter()
            .map(|stage| serde_json::to_string(stage).unwrap_or_default())
            .collect();
        assert_eq!(
            names,
            vec!["\"page\"", "\"link\"", "\"manifest\"", "\"domain_root\""]
        );
    }
}
