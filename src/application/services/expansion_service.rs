//! Short link expansion service.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::entities::{CacheKey, ResolutionResult, ShortLinkRequest};
use crate::domain::{LinkResolver, PlatformCanonicalizer, ResolveError};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheStatus, EdgeCache};

/// Expands short links through the edge cache.
///
/// On a miss the redirect chain is resolved and platform URLs are
/// canonicalized before the result is stored.
pub struct ExpansionService {
    resolver: Arc<dyn LinkResolver>,
    canonicalizer: PlatformCanonicalizer,
    cache: EdgeCache,
}

impl ExpansionService {
    /// Creates a new expansion service.
    pub fn new(
        resolver: Arc<dyn LinkResolver>,
        canonicalizer: PlatformCanonicalizer,
        cache: EdgeCache,
    ) -> Self {
        Self {
            resolver,
            canonicalizer,
            cache,
        }
    }

    pub fn cache(&self) -> &EdgeCache {
        &self.cache
    }

    /// Expands `request.target`, serving from cache when possible.
    ///
    /// `service_host` is the host this service answers on; together with the
    /// target it forms the cache key. Nothing else about the inbound request
    /// affects caching.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when resolution fails. Failed
    /// resolutions are not cached.
    pub async fn expand(
        &self,
        request: &ShortLinkRequest,
        service_host: &str,
    ) -> Result<(ResolutionResult, CacheStatus), AppError> {
        let key = CacheKey::derive(service_host, &request.target);

        let outcome = self
            .cache
            .lookup_or_compute(&key, request.bypass_cache, || {
                self.resolve_uncached(&request.target)
            })
            .await;

        match outcome {
            Ok((result, status)) => {
                metrics::counter!("expand_requests_total", "cache" => status.as_str())
                    .increment(1);
                debug!(
                    "Expanded {} -> {} (cache {})",
                    result.original_url, result.expanded_url, status
                );
                Ok((result, status))
            }
            Err(e) => {
                metrics::counter!("expand_failures_total").increment(1);
                Err(e.into())
            }
        }
    }

    /// Resolves and canonicalizes `target` without touching the cache.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] from the resolver.
    pub async fn resolve_uncached(&self, target: &str) -> Result<ResolutionResult, ResolveError> {
        let resolved = self.resolver.resolve(target).await?;
        let expanded = self.canonicalizer.canonicalize(&resolved);

        if expanded != resolved {
            info!("Canonicalized {} -> {}", resolved, expanded);
        }

        Ok(ResolutionResult::new(target, expanded))
    }
}
