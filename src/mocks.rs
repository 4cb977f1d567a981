//! Mock adapters for demos and testing
//!
//! `MockSourceAdapter` serves a canned payload for one source, optionally
//! after a delay or as a failure, and counts how often it was called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterError, AdapterResult, InstantAnswer, NewsArticle, NewsData, QueryTerm,
	RelatedTopic, SearchPresence, SourceAdapter, SourceKind, SourcePayload, SourceRuntimeConfig,
	TrendPoint, TrendsData, WikiSummary, WikidataEntity,
};

/// Canned adapter for a single source
#[derive(Debug, Clone)]
pub struct MockSourceAdapter {
	config: Adapter,
	kind: SourceKind,
	payload: Option<SourcePayload>,
	delay: Option<Duration>,
	calls: Arc<AtomicUsize>,
}

impl MockSourceAdapter {
	/// Adapter returning `payload` for the payload's source
	pub fn new(payload: SourcePayload) -> Self {
		let kind = payload.kind();
		Self {
			config: Adapter::new(
				format!("mock-{}", kind.as_str()),
				format!("Mock {}", kind.label()),
				"1.0.0".to_string(),
			)
			.with_description("Mock adapter for demos and tests"),
			kind,
			payload: Some(payload),
			delay: None,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Adapter for `kind` whose every call fails
	pub fn failing(kind: SourceKind) -> Self {
		let mut adapter = Self::new(empty_payload(kind));
		adapter.payload = None;
		adapter
	}

	/// Wait `delay` before answering
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Number of `fetch` calls so far, shared across clones
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	/// Demo adapters for every source, shaped like a mid-sized brand
	pub fn demo_set() -> Vec<Self> {
		SourceKind::ALL
			.into_iter()
			.map(|kind| Self::new(demo_payload(kind)))
			.collect()
	}
}

#[async_trait]
impl SourceAdapter for MockSourceAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		self.kind
	}

	async fn fetch(
		&self,
		_term: &QueryTerm,
		_config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}

		self.payload
			.clone()
			.ok_or_else(|| AdapterError::from_http_failure(503))
	}
}

fn empty_payload(kind: SourceKind) -> SourcePayload {
	match kind {
		SourceKind::Trends => SourcePayload::Trends(TrendsData::default()),
		SourceKind::Wikipedia => SourcePayload::Wikipedia(WikiSummary::default()),
		SourceKind::DuckDuckGo => SourcePayload::DuckDuckGo(InstantAnswer::default()),
		SourceKind::News => SourcePayload::News(NewsData::default()),
		SourceKind::Wikidata => SourcePayload::Wikidata(WikidataEntity::default()),
		SourceKind::Google => SourcePayload::Google(SearchPresence::default()),
	}
}

/// Payload for `kind` with some evidence in it
pub fn demo_payload(kind: SourceKind) -> SourcePayload {
	match kind {
		SourceKind::Trends => SourcePayload::Trends(TrendsData::new(
			[40.0, 55.0, 60.0, 45.0]
				.into_iter()
				.enumerate()
				.map(|(week, value)| TrendPoint {
					time: (1_700_000_000 + week as i64 * 604_800).to_string(),
					formatted_time: format!("Week {}", week + 1),
					value,
				})
				.collect(),
		)),
		SourceKind::Wikipedia => SourcePayload::Wikipedia(WikiSummary {
			title: Some("Acme Corporation".to_string()),
			extract: Some("Acme Corporation is a fictional company. ".repeat(60)),
			..Default::default()
		}),
		SourceKind::DuckDuckGo => SourcePayload::DuckDuckGo(InstantAnswer {
			related_topics: (0..4)
				.map(|i| RelatedTopic {
					text: Some(format!("Acme topic {}", i)),
					..Default::default()
				})
				.collect(),
			..Default::default()
		}),
		SourceKind::News => SourcePayload::News(NewsData {
			total_results: 3,
			articles: (0..3)
				.map(|i| NewsArticle {
					title: format!("Acme headline {}", i),
					..Default::default()
				})
				.collect(),
		}),
		SourceKind::Wikidata => SourcePayload::Wikidata(WikidataEntity {
			id: "Q1".to_string(),
			label: Some("Acme Corporation".to_string()),
			..Default::default()
		}),
		SourceKind::Google => SourcePayload::Google(SearchPresence {
			score: 60,
			total_results: 12_000,
			exact_matches: 3,
			authority_score: 10,
			items: Vec::new(),
		}),
	}
}
