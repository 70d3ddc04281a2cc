//! HTTP request handlers.

pub mod expand;
pub mod health;

pub use expand::expand_handler;
pub use health::health_handler;
