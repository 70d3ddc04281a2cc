//! Redirect resolution contract.

use async_trait::async_trait;

/// Maximum number of redirect hops followed for a single link.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Errors raised while walking a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {message}")]
    UpstreamNetwork { url: String, message: String },

    #[error("Redirect location not found in response headers ({status} from {url})")]
    MissingLocation { url: String, status: u16 },

    #[error("Invalid redirect location '{location}' from {url}")]
    InvalidLocation { url: String, location: String },
}

impl ResolveError {
    /// Returns true for malformed redirect responses, as opposed to transport
    /// failures or bad input.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::MissingLocation { .. } | Self::InvalidLocation { .. }
        )
    }
}

/// How a redirect chain is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestProfile {
    /// No extra headers. Used for every domain except the platform's.
    Generic,
    /// Browser-like headers plus the platform Referer.
    Platform,
}

/// What happens when chain-walking fails part way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The error is returned to the caller.
    Propagate,
    /// The error is logged and the best URL known so far is returned.
    FailSoft,
}

impl RequestProfile {
    /// Generic chains fail hard; platform chains fail soft.
    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            Self::Generic => FailurePolicy::Propagate,
            Self::Platform => FailurePolicy::FailSoft,
        }
    }
}

/// Follows the redirect chain of a link to its final destination.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::RedirectResolver`] - reqwest-based resolver
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Returns the URL the chain starting at `url` ends on.
    ///
    /// # Errors
    ///
    /// Generic-profile chains return [`ResolveError`] on transport failures and
    /// on redirect responses without a usable `Location` header. Platform-profile
    /// chains never fail once the input URL has been parsed.
    async fn resolve(&self, url: &str) -> Result<String, ResolveError>;
}
