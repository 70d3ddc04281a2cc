//! Infrastructure layer for external integrations.
//!
//! This layer implements the contracts defined by the domain layer, providing
//! concrete implementations for network resolution and caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache stores (Redis, moka, no-op) and the edge cache policy
//! - [`http`] - Redirect-chain resolution over reqwest

pub mod cache;
pub mod http;
