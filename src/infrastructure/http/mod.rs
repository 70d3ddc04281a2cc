//! Outbound HTTP integrations.
//!
//! - [`RedirectResolver`] - Manual redirect-chain walking with request profiles

mod redirect_resolver;

pub use redirect_resolver::RedirectResolver;
