//! Per-address output shape shared by every format.

use faviconurl_core::{Diagnostic, Discovery, Error, Icon};
use serde::Serialize;

/// Result for one command-line address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressOutput {
    /// The address exactly as given.
    pub address: String,
    /// Normalized address, absent when normalization failed.
    pub original_url: Option<String>,
    /// Working URL after redirects and canonical rewriting.
    pub resolved_url: Option<String>,
    pub icons: Vec<Icon>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

/// Why an address could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutput {
    pub category: &'static str,
    pub message: String,
}

impl AddressOutput {
    pub fn from_discovery(address: &str, discovery: Discovery) -> Self {
        Self {
            address: address.to_string(),
            original_url: Some(discovery.original_url),
            resolved_url: Some(discovery.resolved_url),
            icons: discovery.icons,
            diagnostics: discovery.diagnostics,
            error: None,
        }
    }

    pub fn from_error(address: &str, error: &Error) -> Self {
        Self {
            address: address.to_string(),
            original_url: None,
            resolved_url: None,
            icons: Vec::new(),
            diagnostics: Vec::new(),
            error: Some(ErrorOutput {
                category: error.category(),
                message: error.to_string(),
            }),
        }
    }
}
