//! Cached resolution entries and their keys.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ResolutionResult;

/// Deterministic cache key for a short link.
///
/// Built only from the service host and the URL-encoded target, so requests
/// that differ in any other query parameter or header share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derives the key for `target` as served by `service_host`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let key = CacheKey::derive("expand.example.com", "https://b23.tv/abc");
    /// assert_eq!(
    ///     key.as_str(),
    ///     "https://expand.example.com/expand-shortlink?url=https%3A%2F%2Fb23.tv%2Fabc"
    /// );
    /// ```
    pub fn derive(service_host: &str, target: &str) -> Self {
        Self(format!(
            "https://{}/expand-shortlink?url={}",
            service_host,
            urlencoding::encode(target)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored resolution with its absolute expiry.
///
/// Entries expire by time only; there is no explicit invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub payload: ResolutionResult,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn new(key: &CacheKey, payload: ResolutionResult, ttl_seconds: u64) -> Self {
        Self {
            key: key.as_str().to_string(),
            payload,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
        }
    }

    /// Returns true if the entry has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
