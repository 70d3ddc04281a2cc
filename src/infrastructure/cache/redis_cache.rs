//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::{CacheEntry, CacheKey, ResolutionResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Shared Redis store for resolved links.
///
/// Entries are stored as JSON-encoded [`CacheEntry`] values with a native
/// Redis expiry, so every instance of the service sees the same results.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "expand:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, key: &CacheKey) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<ResolutionResult>> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(&redis_key)
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {}: {}", redis_key, e)))?;

        let Some(raw) = raw else {
            debug!("Cache MISS: {}", key);
            return Ok(None);
        };

        let entry: CacheEntry = serde_json::from_str(&raw)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        if entry.is_expired() {
            debug!("Cache EXPIRED: {}", key);
            return Ok(None);
        }

        debug!("Cache HIT: {} -> {}", key, entry.payload.expanded_url);
        Ok(Some(entry.payload))
    }

    async fn set(
        &self,
        key: &CacheKey,
        payload: &ResolutionResult,
        ttl_seconds: u64,
    ) -> CacheResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let entry = CacheEntry::new(key, payload.clone(), ttl_seconds);
        let raw = serde_json::to_string(&entry)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        conn.set_ex::<_, _, ()>(&redis_key, raw, ttl_seconds)
            .await
            .map_err(|e| CacheError::OperationError(format!("SET {}: {}", redis_key, e)))?;

        debug!(
            "Cache SET: {} -> {} (TTL: {}s)",
            key, payload.expanded_url, ttl_seconds
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
