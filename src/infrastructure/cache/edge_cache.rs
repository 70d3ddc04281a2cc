//! Time-bounded deduplication of link resolutions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::service::CacheService;
use crate::domain::entities::{CacheKey, ResolutionResult};

/// Server-side lifetime of a stored resolution.
pub const DEFAULT_SERVER_TTL_SECONDS: u64 = 3600;

/// Lifetime advised to clients via `Cache-Control`. Shorter than the server
/// TTL so the edge refreshes before browsers are told to.
pub const DEFAULT_CLIENT_MAX_AGE_SECONDS: u64 = 1800;

/// How a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Bypass,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup-or-compute policy over a [`CacheService`] store.
///
/// There is no in-flight deduplication: concurrent misses for the same key
/// each compute, and the last store wins.
#[derive(Clone)]
pub struct EdgeCache {
    store: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

impl EdgeCache {
    pub fn new(store: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub fn store(&self) -> &Arc<dyn CacheService> {
        &self.store
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns the cached result for `key`, or computes and stores a new one.
    ///
    /// With `bypass` set the lookup is skipped and the entry is overwritten
    /// with the fresh result. Failed computations are returned as-is and
    /// never stored. Store failures are logged and otherwise ignored.
    pub async fn lookup_or_compute<F, Fut, E>(
        &self,
        key: &CacheKey,
        bypass: bool,
        compute: F,
    ) -> Result<(ResolutionResult, CacheStatus), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ResolutionResult, E>>,
    {
        if !bypass {
            match self.store.get(key).await {
                Ok(Some(cached)) => return Ok((cached, CacheStatus::Hit)),
                Ok(None) => {}
                Err(e) => warn!("Cache lookup failed for {}: {}", key, e),
            }
        } else {
            debug!("Cache BYPASS: {}", key);
        }

        let result = compute().await?;

        if let Err(e) = self.store.set(key, &result, self.ttl_seconds).await {
            warn!("Failed to cache {}: {}", key, e);
        }

        let status = if bypass {
            CacheStatus::Bypass
        } else {
            CacheStatus::Miss
        };

        Ok((result, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::cache::{MemoryCache, NullCache};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key() -> CacheKey {
        CacheKey::derive("expand.example.com", "https://t.co/abc")
    }

    async fn compute_counted(
        calls: &AtomicUsize,
        expanded: &str,
    ) -> Result<ResolutionResult, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResolutionResult::new("https://t.co/abc", expanded))
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache = EdgeCache::new(Arc::new(MemoryCache::new()), 3600);
        let calls = AtomicUsize::new(0);

        let (first, status) = cache
            .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://a.example/"))
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(first.expanded_url, "https://a.example/");

        let (second, status) = cache
            .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://b.example/"))
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bypass_recomputes_and_refreshes() {
        let cache = EdgeCache::new(Arc::new(MemoryCache::new()), 3600);
        let calls = AtomicUsize::new(0);

        cache
            .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://a.example/"))
            .await
            .unwrap();

        let (fresh, status) = cache
            .lookup_or_compute(&key(), true, || compute_counted(&calls, "https://b.example/"))
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Bypass);
        assert_eq!(fresh.expanded_url, "https://b.example/");

        let (cached, status) = cache
            .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://c.example/"))
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Hit);
        assert_eq!(cached.expanded_url, "https://b.example/");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_stored() {
        let cache = EdgeCache::new(Arc::new(MemoryCache::new()), 3600);
        let calls = AtomicUsize::new(0);

        let failed: Result<_, String> = cache
            .lookup_or_compute(&key(), false, || async { Err("upstream down".to_string()) })
            .await;
        assert_eq!(failed.unwrap_err(), "upstream down");

        let (_, status) = cache
            .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://a.example/"))
            .await
            .unwrap();
        assert_eq!(status, CacheStatus::Miss);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_null_store_always_computes() {
        let cache = EdgeCache::new(Arc::new(NullCache::new()), 3600);
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let (_, status) = cache
                .lookup_or_compute(&key(), false, || compute_counted(&calls, "https://a.example/"))
                .await
                .unwrap();
            assert_eq!(status, CacheStatus::Miss);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
