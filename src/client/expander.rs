//! HTTP client for a running expansion service.

use super::config::ClientConfig;
use super::links::is_short_url;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Maximum number of nested re-expansions after the first request.
pub const MAX_EXPANSION_DEPTH: usize = 3;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request to expansion service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Expansion service returned status {0}")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct ExpandBody {
    #[serde(default)]
    expanded_url: Option<String>,
}

/// Calls the expansion endpoint and follows nested short links.
#[derive(Debug, Clone)]
pub struct ExpanderClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ExpanderClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> bool {
        self.config.set_endpoint(endpoint)
    }

    /// Expands `link`, re-expanding while the result is itself a short link.
    ///
    /// Never fails: on transport errors or non-2xx responses the last known
    /// link is returned.
    pub async fn expand(&self, link: &str) -> String {
        let mut current = link.to_string();
        let mut depth = 0;

        loop {
            let expanded = match self.expand_once(&current).await {
                Ok(Some(url)) if !url.is_empty() => url,
                Ok(_) => current.clone(),
                Err(e) => {
                    tracing::debug!(depth, link = %current, "Failed to expand link: {}", e);
                    return current;
                }
            };
            tracing::debug!(depth, "{} -> {}", current, expanded);

            if depth < MAX_EXPANSION_DEPTH && is_short_url(&expanded) {
                tracing::debug!(depth, "Found nested short URL, expanding further: {}", expanded);
                current = expanded;
                depth += 1;
            } else {
                return expanded;
            }
        }
    }

    /// Destination for a link found on a page.
    ///
    /// Short links are expanded. Other links are checked for an embedded
    /// `q` or `target` query parameter, which is expanded as well when it is
    /// itself a short link. Returns `None` when neither applies.
    pub async fn extract_target(&self, href: &str) -> Option<String> {
        if is_short_url(href) {
            tracing::debug!("Detected short URL: {}", href);
            return Some(self.expand(href).await);
        }

        let target = embedded_target(href)?;
        if is_short_url(&target) {
            tracing::debug!("Found short URL in redirect parameter: {}", target);
            Some(self.expand(&target).await)
        } else {
            Some(target)
        }
    }

    async fn expand_once(&self, link: &str) -> Result<Option<String>, ClientError> {
        let response = self.http.get(self.config.request_url(link)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body: ExpandBody = response.json().await?;
        Ok(body.expanded_url)
    }
}

/// Decoded `q` (or, failing that, `target`) query parameter of `href`.
pub fn embedded_target(href: &str) -> Option<String> {
    let url = Url::parse(href).ok()?;
    let lookup = |name: &str| {
        url.query_pairs()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    };
    lookup("q").or_else(|| lookup("target"))
}
