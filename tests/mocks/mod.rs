//! Shared fixtures for integration tests
//!
//! A fake upstream serving provider-shaped responses, settings pointing at
//! it, and a helper spawning the aggregator on an ephemeral port.

pub mod configs;
pub mod test_server;
pub mod upstream;

#[allow(unused_imports)]
pub use test_server::TestServer;
#[allow(unused_imports)]
pub use upstream::{FakeUpstream, TrendsMode};
