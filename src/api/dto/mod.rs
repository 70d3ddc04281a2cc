//! Request and response bodies of the HTTP API.

pub mod expand;
pub mod health;

pub use expand::{ExpandParams, ExpandResponse};
