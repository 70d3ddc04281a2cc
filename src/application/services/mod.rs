//! Application services implementing the expansion workflow.
//!
//! Services sit between HTTP handlers and infrastructure: they own the
//! cache policy and wire the resolver to the canonicalizer.

pub mod expansion_service;

pub use expansion_service::ExpansionService;
