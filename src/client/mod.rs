//! Consumer side of the expansion service.
//!
//! Transport-level pieces of a link-rewriting agent: calling the service
//! with nested expansion, finding the destination of redirect links, and
//! batching rewrites through a debounced queue.

mod config;
mod expander;
mod links;
mod queue;

pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use expander::{ClientError, ExpanderClient, MAX_EXPANSION_DEPTH, embedded_target};
pub use links::{MAX_DISPLAY_LENGTH, format_for_display, is_short_url, rewrite_text};
pub use queue::{DEFAULT_DEBOUNCE, PendingLink, Rewrite, RewriteQueue};
