//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::entities::{CacheKey, ResolutionResult};

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
    SerializationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
            Self::SerializationError(e) => write!(f, "Cache serialization error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Storage backend for resolved short links.
///
/// Implementations must be safe for concurrent reads and writes. Concurrent
/// writes to the same key are last-write-wins. Entries expire by TTL only.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Shared Redis store
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process moka store
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the stored resolution for `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(result))` on cache hit
    /// - `Ok(None)` on cache miss or expired entry
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend cannot be reached or the stored
    /// value cannot be decoded. Callers treat errors as misses.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<ResolutionResult>>;

    /// Stores `payload` under `key` for `ttl_seconds`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] on backend failures. Callers log and continue.
    async fn set(
        &self,
        key: &CacheKey,
        payload: &ResolutionResult,
        ttl_seconds: u64,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    ///
    /// Used by the health endpoint to report cache status.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
