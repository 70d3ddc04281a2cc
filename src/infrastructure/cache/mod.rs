//! Caching layer for resolved short links.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Shared Redis-backed store
//! - [`MemoryCache`] - In-process moka store for single-node deployments
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! [`EdgeCache`] applies the lookup-or-compute policy on top of any of them.

mod edge_cache;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use edge_cache::{
    CacheStatus, DEFAULT_CLIENT_MAX_AGE_SECONDS, DEFAULT_SERVER_TTL_SECONDS, EdgeCache,
};
pub use memory_cache::MemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};
