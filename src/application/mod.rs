//! Application layer containing the expansion workflow.
//!
//! See [`services`] for the orchestration of cache, resolver and canonicalizer.

pub mod services;
