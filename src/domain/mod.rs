//! Domain layer: value types and the pure rules of link expansion.
//!
//! Nothing in this layer performs I/O. Network resolution and cache storage
//! are implemented by [`crate::infrastructure`] against the contracts here.
//!
//! # Modules
//!
//! - [`entities`] - Requests, hops, results and cache entries
//! - [`platform`] - Recognition parameters of the video platform
//! - [`canonicalizer`] - Canonical video URL extraction
//! - [`resolver`] - Redirect resolution trait, profiles and errors
//!
//! # Expansion Flow
//!
//! 1. HTTP handler builds a [`entities::ShortLinkRequest`]
//! 2. Cache lookup by [`entities::CacheKey`]
//! 3. On miss, [`resolver::LinkResolver`] walks the redirect chain
//! 4. [`canonicalizer::PlatformCanonicalizer`] cleans platform URLs
//! 5. The [`entities::ResolutionResult`] is stored and returned

pub mod canonicalizer;
pub mod entities;
pub mod platform;
pub mod resolver;

pub use canonicalizer::PlatformCanonicalizer;
pub use platform::Platform;
pub use resolver::{FailurePolicy, LinkResolver, RequestProfile, ResolveError};

#[cfg(test)]
pub use resolver::MockLinkResolver;
