//! In-process cache backed by moka.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::{CacheEntry, CacheKey, ResolutionResult};
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

/// Expires each entry at its own `expires_at`.
struct EntryExpiry;

impl EntryExpiry {
    fn remaining(entry: &CacheEntry) -> Option<Duration> {
        let remaining = entry.expires_at - chrono::Utc::now();
        Some(remaining.to_std().unwrap_or(Duration::ZERO))
    }
}

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Self::remaining(value)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Self::remaining(value)
    }
}

/// Single-node cache for deployments without Redis.
///
/// There is no capacity bound: entries leave the cache only when their TTL
/// runs out.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Cache<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        let entries = Cache::builder().expire_after(EntryExpiry).build();
        Self { entries }
    }

    /// Number of live entries (approximate, see moka's `entry_count`).
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<ResolutionResult>> {
        match self.entries.get(key.as_str()).await {
            Some(entry) if !entry.is_expired() => {
                debug!("Cache HIT: {} -> {}", key, entry.payload.expanded_url);
                Ok(Some(entry.payload))
            }
            Some(_) => {
                debug!("Cache EXPIRED: {}", key);
                self.entries.invalidate(key.as_str()).await;
                Ok(None)
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &ResolutionResult,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        let entry = CacheEntry::new(key, payload.clone(), ttl_seconds);
        self.entries.insert(entry.key.clone(), entry).await;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            key, payload.expanded_url, ttl_seconds
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
