//! DTOs for the expansion endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ResolutionResult, ShortLinkRequest};
use crate::error::AppError;

/// Query string of `GET /`.
///
/// Unknown parameters are ignored. A repeated key keeps its first value.
#[derive(Debug, Default)]
pub struct ExpandParams {
    pub shorturl: Option<String>,
    pub nocache: Option<String>,
}

impl ExpandParams {
    /// Collects the known parameters from decoded query pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "shorturl" => &mut params.shorturl,
                "nocache" => &mut params.nocache,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Converts the query into a domain request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `shorturl` is absent or empty.
    pub fn into_request(self) -> Result<ShortLinkRequest, AppError> {
        let target = self
            .shorturl
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::bad_request("Please provide the 'shorturl' parameter."))?;

        let bypass_cache = self.nocache.as_deref() == Some("1");

        Ok(ShortLinkRequest::new(target, bypass_cache))
    }
}

/// Successful expansion body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpandResponse {
    pub original_url: String,
    pub expanded_url: String,
}

impl From<ResolutionResult> for ExpandResponse {
    fn from(result: ResolutionResult) -> Self {
        Self {
            original_url: result.original_url,
            expanded_url: result.expanded_url,
        }
    }
}
