//! Brand Health Server
//!
//! Main entry point for the aggregator server

use brand_health::BrandHealthBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	BrandHealthBuilder::new().start_server().await
}
