//! Aggregator server on an ephemeral port

use std::sync::Arc;

use brand_health::{BrandHealthBuilder, Settings, SourceAdapter};
use tokio::task::JoinHandle;

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
	pub async fn spawn(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_adapters(settings, Vec::new()).await
	}

	/// Spawn with custom adapters replacing the defaults for their sources
	pub async fn spawn_with_adapters(
		settings: Settings,
		adapters: Vec<Arc<dyn SourceAdapter>>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let builder = adapters
			.into_iter()
			.fold(BrandHealthBuilder::new().with_settings(settings), |builder, adapter| {
				builder.with_adapter(adapter)
			});
		let (app, _) = builder.start().await?;

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}", addr);

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
