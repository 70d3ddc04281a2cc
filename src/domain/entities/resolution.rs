//! Redirect hops and resolution results.

use serde::{Deserialize, Serialize};

/// One step of a redirect chain.
///
/// Only lives while the chain is being walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    pub url: String,
    pub status_code: u16,
    pub location: Option<String>,
}

impl RedirectHop {
    /// Returns true if the status code is in the 3xx range.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }
}

/// Outcome of expanding a short link.
///
/// `expanded_url` is never empty: when nothing better is known it holds
/// `original_url`. Serialized as the public response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub original_url: String,
    pub expanded_url: String,
}

impl ResolutionResult {
    /// Builds a result, falling back to `original_url` when `expanded_url` is empty.
    pub fn new(original_url: impl Into<String>, expanded_url: impl Into<String>) -> Self {
        let original_url = original_url.into();
        let expanded_url = expanded_url.into();

        let expanded_url = if expanded_url.is_empty() {
            original_url.clone()
        } else {
            expanded_url
        };

        Self {
            original_url,
            expanded_url,
        }
    }

    /// Result for a link that could not be expanded any further.
    pub fn unchanged(original_url: impl Into<String>) -> Self {
        let original_url = original_url.into();
        Self {
            expanded_url: original_url.clone(),
            original_url,
        }
    }
}
