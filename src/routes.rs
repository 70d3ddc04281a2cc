//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /?shorturl=...` - Short link expansion (public)
//! - `GET  /health`        - Health check: cache backend (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Panic recovery** - Panics become JSON 500 responses
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{expand_handler, health_handler};
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and middleware without path normalization.
///
/// Suitable for in-process testing with `axum-test`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(expand_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(panic::layer())
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
