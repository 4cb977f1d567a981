//! Brand Health Adapters
//!
//! HTTP adapters for each data source, plus the page-metadata scraper.

pub mod duckduckgo_adapter;
pub mod google_adapter;
pub mod http;
pub mod news_adapter;
pub mod page_metadata;
pub mod trends_adapter;
pub mod wikidata_adapter;
pub mod wikipedia_adapter;

use std::collections::HashMap;
use std::sync::Arc;

use bh_config::Settings;
use tracing::debug;

pub use bh_types::{AdapterError, AdapterResult, SourceAdapter, SourceKind};
pub use duckduckgo_adapter::DuckDuckGoAdapter;
pub use google_adapter::{score_results, GoogleSearchAdapter, SearchQueryOptions};
pub use http::{build_client, ClientConfig};
pub use news_adapter::NewsAdapter;
pub use page_metadata::{suggest_term, PageScraper, ScrapeError};
pub use trends_adapter::TrendsAdapter;
pub use wikidata_adapter::WikidataAdapter;
pub use wikipedia_adapter::WikipediaAdapter;

/// Adapters keyed by the source they serve
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
	adapters: HashMap<SourceKind, Arc<dyn SourceAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build the default adapter for every source, one client each
	pub fn from_settings(settings: &Settings) -> AdapterResult<Self> {
		let client_config = ClientConfig::new(settings.http.user_agent.clone());
		let sources = &settings.sources;
		let mut registry = Self::new();

		registry.register(Arc::new(TrendsAdapter::new(build_client(&client_config)?)));
		registry.register(Arc::new(
			WikipediaAdapter::new(build_client(&client_config)?)
				.with_disambiguation_suffix(sources.wikipedia.query.disambiguation_suffix.clone()),
		));
		registry.register(Arc::new(DuckDuckGoAdapter::new(build_client(&client_config)?)));
		registry.register(Arc::new(
			NewsAdapter::new(build_client(&client_config)?)
				.with_language(sources.news.query.language.clone())
				.with_page_size(sources.news.query.page_size),
		));
		registry.register(Arc::new(
			WikidataAdapter::new(build_client(&client_config)?)
				.with_language(sources.wikidata.query.language.clone()),
		));

		let google_query = &sources.google.query;
		registry.register(Arc::new(GoogleSearchAdapter::new(
			build_client(&client_config)?,
			SearchQueryOptions {
				search_engine_id: google_query
					.search_engine_id
					.as_ref()
					.and_then(|id| id.resolve_optional_secret()),
				keywords: google_query.keywords.clone(),
				excluded_sites: google_query.excluded_sites.clone(),
				page_size: google_query.page_size,
			},
		)));

		Ok(registry)
	}

	/// Register an adapter, replacing any adapter for the same source
	pub fn register(&mut self, adapter: Arc<dyn SourceAdapter>) {
		let kind = adapter.kind();
		debug!("Registering adapter '{}' for {}", adapter.id(), kind);
		self.adapters.insert(kind, adapter);
	}

	pub fn get(&self, kind: SourceKind) -> Option<Arc<dyn SourceAdapter>> {
		self.adapters.get(&kind).cloned()
	}

	pub fn get_all(&self) -> &HashMap<SourceKind, Arc<dyn SourceAdapter>> {
		&self.adapters
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
