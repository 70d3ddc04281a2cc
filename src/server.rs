//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, resolver construction, and Axum server lifecycle.

use crate::application::services::ExpansionService;
use crate::config::Config;
use crate::domain::{Platform, PlatformCanonicalizer};
use crate::infrastructure::cache::{CacheService, EdgeCache, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::http::RedirectResolver;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Cache store (Redis, in-memory, or disabled)
/// - Redirect resolver and platform canonicalizer
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wires resolver, canonicalizer and cache into the shared handler state.
///
/// # Errors
///
/// Returns an error if the upstream HTTP client cannot be built.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let store = build_cache_store(config).await;
    let cache = EdgeCache::new(store, config.cache_ttl_seconds);

    let platform = Platform::bilibili();
    let resolver = RedirectResolver::new(platform.clone(), config.max_redirects)
        .context("Failed to build upstream HTTP client")?;

    let service = ExpansionService::new(
        Arc::new(resolver),
        PlatformCanonicalizer::new(platform),
        cache,
    );

    Ok(AppState::new(
        Arc::new(service),
        config.client_max_age_seconds,
        config.public_host.clone(),
    ))
}

/// Picks the cache store: Redis when configured and reachable, otherwise
/// in-process memory, or nothing when caching is disabled.
async fn build_cache_store(config: &Config) -> Arc<dyn CacheService> {
    if !config.cache_enabled {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    }

    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
            }
        }
    }

    tracing::info!("Cache enabled (in-memory)");
    Arc::new(MemoryCache::new())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
