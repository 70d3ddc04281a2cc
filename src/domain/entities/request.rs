//! Inbound expansion request.

/// A single request to expand a short link.
///
/// Created per inbound call from the query string and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkRequest {
    pub target: String,
    /// When true the cached entry is ignored and recomputed.
    pub bypass_cache: bool,
}

impl ShortLinkRequest {
    /// Creates a new request for `target`.
    pub fn new(target: impl Into<String>, bypass_cache: bool) -> Self {
        Self {
            target: target.into(),
            bypass_cache,
        }
    }
}
