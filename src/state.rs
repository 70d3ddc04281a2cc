//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ExpansionService;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub expansion_service: Arc<ExpansionService>,
    /// Same store the expansion service caches into; used for health checks.
    pub cache: Arc<dyn CacheService>,
    /// `Cache-Control: max-age` advised on successful responses.
    pub client_max_age_seconds: u64,
    /// Cache key host for requests without a usable `Host` header.
    pub public_host: String,
}

impl AppState {
    pub fn new(
        expansion_service: Arc<ExpansionService>,
        client_max_age_seconds: u64,
        public_host: impl Into<String>,
    ) -> Self {
        let cache = expansion_service.cache().store().clone();

        Self {
            expansion_service,
            cache,
            client_max_age_seconds,
            public_host: public_host.into(),
        }
    }
}
