//! # Link Expander
//!
//! A short link expansion service built with Axum: it walks the HTTP redirect
//! chain of a short link, canonicalizes Bilibili video URLs, and caches
//! results so repeated lookups skip the network.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Value types, canonicalization rules, resolver contract
//! - **Application Layer** ([`application`]) - Expansion workflow and cache policy
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest resolver, Redis and in-memory caches
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Client** ([`client`]) - Consumer-side core: nested expansion and link rewriting
//!
//! ## Endpoint
//!
//! ```text
//! GET /?shorturl=https%3A%2F%2Fb23.tv%2FxYz12
//!
//! 200 OK
//! Cache-Control: max-age=1800
//! {"original_url":"https://b23.tv/xYz12","expanded_url":"https://www.bilibili.com/video/BV1xx411c7mD"}
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ExpansionService;
    pub use crate::domain::entities::{CacheKey, ResolutionResult, ShortLinkRequest};
    pub use crate::domain::{LinkResolver, Platform, PlatformCanonicalizer, ResolveError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheService, CacheStatus, EdgeCache, MemoryCache};
    pub use crate::infrastructure::http::RedirectResolver;
    pub use crate::state::AppState;
}
