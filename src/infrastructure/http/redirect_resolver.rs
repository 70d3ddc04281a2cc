//! Redirect-chain resolution over HTTP.
//!
//! Redirects are followed manually (the client never auto-follows) so that
//! every hop can be inspected and the chain bounded.

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::RedirectHop;
use crate::domain::platform::{PLATFORM_HEADERS, Platform};
use crate::domain::resolver::{FailurePolicy, LinkResolver, RequestProfile, ResolveError};

/// Resolves short links by walking their redirect chains.
///
/// Links on the platform's domains are requested with the platform profile
/// and fail soft; every other link uses the generic profile and fails hard.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    client: reqwest::Client,
    platform: Platform,
    platform_headers: HeaderMap,
    max_redirects: usize,
}

impl RedirectResolver {
    /// Creates a resolver with its own non-following HTTP client.
    ///
    /// # Errors
    ///
    /// Returns a `reqwest::Error` if the HTTP client cannot be built.
    pub fn new(platform: Platform, max_redirects: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self::with_client(client, platform, max_redirects))
    }

    /// Creates a resolver around an existing client.
    ///
    /// The client must have redirect following disabled, otherwise the chain
    /// collapses into a single hop.
    pub fn with_client(client: reqwest::Client, platform: Platform, max_redirects: usize) -> Self {
        let platform_headers = build_platform_headers(&platform);

        Self {
            client,
            platform,
            platform_headers,
            max_redirects,
        }
    }

    /// Request profile used for a chain starting at `url`.
    pub fn profile_for(&self, url: &str) -> RequestProfile {
        if self.platform.matches(url) {
            RequestProfile::Platform
        } else {
            RequestProfile::Generic
        }
    }

    /// Walks the chain, updating `current` after every followed hop.
    ///
    /// Stops at the first non-redirect status or after `max_redirects` hops,
    /// whichever comes first. `current` always holds the last known URL, also
    /// when an error is returned.
    async fn walk_chain(
        &self,
        current: &mut String,
        profile: RequestProfile,
    ) -> Result<(), ResolveError> {
        for hop_number in 1..=self.max_redirects {
            let hop = self.fetch_hop(current.as_str(), profile).await?;

            debug!(
                "Hop {}: {} -> {} ({:?})",
                hop_number, hop.url, hop.status_code, hop.location
            );

            if !hop.is_redirect() {
                return Ok(());
            }

            let location = hop.location.ok_or_else(|| ResolveError::MissingLocation {
                url: hop.url.clone(),
                status: hop.status_code,
            })?;

            *current = resolve_location(&hop.url, &location)?;
        }

        debug!(
            "Redirect limit of {} reached, stopping at {}",
            self.max_redirects, current
        );

        Ok(())
    }

    async fn fetch_hop(
        &self,
        url: &str,
        profile: RequestProfile,
    ) -> Result<RedirectHop, ResolveError> {
        let mut request = self.client.get(url);
        if profile == RequestProfile::Platform {
            request = request.headers(self.platform_headers.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ResolveError::UpstreamNetwork {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(RedirectHop {
            url: url.to_string(),
            status_code: response.status().as_u16(),
            location,
        })
    }
}

#[async_trait]
impl LinkResolver for RedirectResolver {
    async fn resolve(&self, url: &str) -> Result<String, ResolveError> {
        validate_target(url)?;

        let profile = self.profile_for(url);
        let mut current = url.to_string();

        match self.walk_chain(&mut current, profile).await {
            Ok(()) => Ok(current),
            Err(e) => match profile.failure_policy() {
                FailurePolicy::Propagate => Err(e),
                FailurePolicy::FailSoft => {
                    warn!(
                        "Platform link {} failed to resolve: {}. Using {}",
                        url, e, current
                    );
                    Ok(current)
                }
            },
        }
    }
}

/// Rejects anything that is not an absolute http(s) URL.
fn validate_target(url: &str) -> Result<(), ResolveError> {
    let parsed = Url::parse(url).map_err(|e| ResolveError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ResolveError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Resolves a `Location` value against the URL that returned it.
///
/// Absolute locations replace the base entirely.
fn resolve_location(base: &str, location: &str) -> Result<String, ResolveError> {
    let invalid = || ResolveError::InvalidLocation {
        url: base.to_string(),
        location: location.to_string(),
    };

    let base = Url::parse(base).map_err(|_| invalid())?;
    let next = base.join(location).map_err(|_| invalid())?;

    Ok(next.to_string())
}

fn build_platform_headers(platform: &Platform) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in PLATFORM_HEADERS {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            headers.insert(name, value);
        }
    }

    if let Ok(referer) = HeaderValue::from_str(&platform.referer) {
        headers.insert(header::REFERER, referer);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolver::DEFAULT_MAX_REDIRECTS;

    #[test]
    fn test_resolve_absolute_location() {
        assert_eq!(
            resolve_location("https://b23.tv/abc", "https://www.bilibili.com/video/BV1xx411c7mD")
                .unwrap(),
            "https://www.bilibili.com/video/BV1xx411c7mD"
        );
    }

    #[test]
    fn test_resolve_relative_location() {
        assert_eq!(
            resolve_location("https://t.co/abc/def", "/landing?x=1").unwrap(),
            "https://t.co/landing?x=1"
        );
        assert_eq!(
            resolve_location("https://t.co/abc/def", "next").unwrap(),
            "https://t.co/abc/next"
        );
        assert_eq!(
            resolve_location("https://t.co/abc", "//example.com/path").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_validate_target() {
        assert!(validate_target("https://t.co/abc").is_ok());
        assert!(validate_target("http://bit.ly/abc").is_ok());

        assert!(matches!(
            validate_target("t.co/abc"),
            Err(ResolveError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_target("ftp://example.com/file"),
            Err(ResolveError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_profile_selection() {
        let resolver = RedirectResolver::new(Platform::bilibili(), DEFAULT_MAX_REDIRECTS).unwrap();

        assert_eq!(
            resolver.profile_for("https://b23.tv/abc"),
            RequestProfile::Platform
        );
        assert_eq!(
            resolver.profile_for("https://www.bilibili.com/video/av1"),
            RequestProfile::Platform
        );
        assert_eq!(
            resolver.profile_for("https://t.co/abc"),
            RequestProfile::Generic
        );
    }

    #[test]
    fn test_platform_headers_include_referer() {
        let headers = build_platform_headers(&Platform::bilibili());

        assert_eq!(
            headers.get(header::REFERER).unwrap(),
            "https://www.bilibili.com/"
        );
        assert!(headers.get(header::USER_AGENT).is_some());
        assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    }

    #[tokio::test]
    async fn test_invalid_target_fails_before_any_request() {
        let resolver = RedirectResolver::new(Platform::bilibili(), DEFAULT_MAX_REDIRECTS).unwrap();
        let result = resolver.resolve("not a url").await;

        assert!(matches!(result, Err(ResolveError::InvalidUrl { .. })));
    }
}
