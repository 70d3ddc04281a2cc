//! Client-side configuration.

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Connection settings for an [`ExpanderClient`](super::ExpanderClient).
///
/// Passed at construction; the endpoint can be changed afterwards with
/// [`ClientConfig::set_endpoint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Points the client at a different expansion service.
    ///
    /// Blank values are ignored and the previous endpoint is kept.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> bool {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return false;
        }
        self.endpoint = normalize_endpoint(endpoint);
        true
    }

    /// Full request URL for expanding `link`.
    pub fn request_url(&self, link: &str) -> String {
        format!("{}/?shorturl={}", self.endpoint, urlencoding::encode(link))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

fn normalize_endpoint(endpoint: String) -> String {
    endpoint.trim().trim_end_matches('/').to_string()
}
