//! HTTP request handlers for the web server.

mod analyze;
mod api;

// Re-export handlers for use by the router
pub use analyze::analyze;
pub use api::{health, not_found};
