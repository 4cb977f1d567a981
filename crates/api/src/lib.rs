//! Brand Health API
//!
//! Axum routes and middleware for the brand health aggregator.

pub mod handlers;
pub mod rate_limit;
pub mod router;
pub mod security;
pub mod state;

pub use rate_limit::with_rate_limit;
pub use router::create_router;
pub use security::with_security_headers;
pub use state::AppState;

#[cfg(feature = "openapi")]
pub mod openapi;
