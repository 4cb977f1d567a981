use std::sync::Arc;

use bh_adapters::PageScraper;
use bh_config::Settings;
use bh_service::AggregatorTrait;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub aggregator_service: Arc<dyn AggregatorTrait>,
	pub page_scraper: Arc<PageScraper>,
	pub settings: Arc<Settings>,
}

impl AppState {
	/// Whether error bodies may carry internal details
	pub fn expose_error_details(&self) -> bool {
		self.settings.expose_error_details()
	}
}
