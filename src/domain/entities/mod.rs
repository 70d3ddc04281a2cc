//! Core value types of the expansion service.
//!
//! All of these are request-scoped data except [`CacheEntry`], which lives in
//! the cache store owned by the infrastructure layer.
//!
//! - [`ShortLinkRequest`] - An inbound expansion request
//! - [`RedirectHop`] - One step of a redirect chain
//! - [`ResolutionResult`] - Original and expanded URL pair
//! - [`CacheEntry`] / [`CacheKey`] - Stored results and their deterministic keys

pub mod cache_entry;
pub mod request;
pub mod resolution;

pub use cache_entry::{CacheEntry, CacheKey};
pub use request::ShortLinkRequest;
pub use resolution::{RedirectHop, ResolutionResult};
