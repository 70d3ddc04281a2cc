//! Helpers shared by request handlers.
//!
//! - [`extract_domain`] - Service host extraction from HTTP headers

pub mod extract_domain;
