//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into expansion requests and formats
//! responses according to the public contract.
//!
//! # Modules
//!
//! - [`dto`] - Query and body serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and panic recovery

pub mod dto;
pub mod handlers;
pub mod middleware;
