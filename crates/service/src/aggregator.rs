//! Core aggregation service logic

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use bh_adapters::AdapterRegistry;
use bh_config::{Settings, SourceSettings};
use bh_types::{
	AggregateData, AggregateResult, AggregationMetadata, QueryTerm, QueryTermError,
	ScoringModel, SourceAdapter, SourceKind, SourcePayload, SourceReport, SourceResults,
	SourceRuntimeConfig, SourceStatus,
};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::guard::{guard_with_outcome, GuardOutcome};
use crate::scorer::Scorer;

#[derive(Debug, Error)]
pub enum AggregatorServiceError {
	#[error("validation error: {0}")]
	Validation(#[from] QueryTermError),
	#[error("no adapter registered for source '{0}'")]
	SourceNotConfigured(SourceKind),
	#[error("source '{0}' is disabled")]
	SourceDisabled(SourceKind),
}

/// One entry of the aggregation: which adapter to call and how
#[derive(Debug, Clone)]
pub struct SourceDefinition {
	pub kind: SourceKind,
	pub adapter: Arc<dyn SourceAdapter>,
	pub runtime: SourceRuntimeConfig,
	pub weight: f64,
	pub enabled: bool,
}

impl SourceDefinition {
	pub fn new(adapter: Arc<dyn SourceAdapter>, runtime: SourceRuntimeConfig) -> Self {
		Self {
			kind: adapter.kind(),
			adapter,
			runtime,
			weight: 1.0,
			enabled: true,
		}
	}

	/// Definition from settings, resolving the API key if one is configured
	pub fn from_settings(adapter: Arc<dyn SourceAdapter>, settings: &SourceSettings) -> Self {
		let kind = adapter.kind();
		let mut runtime = SourceRuntimeConfig::new(kind, settings.endpoint.clone())
			.with_timeout_ms(settings.timeout_ms)
			.with_retry(settings.retry.clone());
		if let Some(api_key) = settings
			.api_key
			.as_ref()
			.and_then(|key| key.resolve_optional_secret())
		{
			runtime = runtime.with_api_key(api_key);
		}

		Self::new(adapter, runtime)
			.with_weight(settings.weight)
			.with_enabled(settings.enabled)
	}

	pub fn with_weight(mut self, weight: f64) -> Self {
		self.weight = weight;
		self
	}

	pub fn with_enabled(mut self, enabled: bool) -> Self {
		self.enabled = enabled;
		self
	}
}

/// Trait for aggregation operations - enables mocking in handler tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregatorTrait: Send + Sync {
	/// Validate the term, fan out to every enabled source and score the results
	async fn aggregate(&self, term: &str) -> Result<AggregateResult, AggregatorServiceError>;

	/// Run a single source through the same guard; `None` when unavailable
	async fn fetch_source(
		&self,
		kind: SourceKind,
		term: &str,
	) -> Result<Option<SourcePayload>, AggregatorServiceError>;

	/// Configured sources and whether each is enabled, in reporting order
	fn source_status(&self) -> Vec<(SourceKind, bool)>;

	fn scoring_model(&self) -> ScoringModel;
}

/// Result of one spawned source task
struct SourceRun {
	kind: SourceKind,
	status: SourceStatus,
	duration_ms: u64,
	payload: Option<SourcePayload>,
}

/// Service aggregating brand signals from the configured sources
#[derive(Debug, Clone)]
pub struct AggregatorService {
	sources: Vec<SourceDefinition>,
	scorer: Scorer,
}

impl AggregatorService {
	/// Create a service from explicit definitions; weights feed the scorer
	pub fn new(sources: Vec<SourceDefinition>, scorer: Scorer) -> Self {
		let scorer = sources
			.iter()
			.fold(scorer, |scorer, def| scorer.with_weight(def.kind, def.weight));
		Self { sources, scorer }
	}

	/// Build definitions for every source from settings and registered adapters
	pub fn from_settings(
		settings: &Settings,
		registry: &AdapterRegistry,
	) -> Result<Self, AggregatorServiceError> {
		let sources = settings
			.sources
			.ordered()
			.into_iter()
			.map(|(kind, source_settings)| {
				registry
					.get(kind)
					.map(|adapter| SourceDefinition::from_settings(adapter, source_settings))
					.ok_or(AggregatorServiceError::SourceNotConfigured(kind))
			})
			.collect::<Result<Vec<_>, _>>()?;

		let scorer = Scorer::new(settings.scoring.model, settings.scoring.constants.clone());
		Ok(Self::new(sources, scorer))
	}

	pub fn sources(&self) -> &[SourceDefinition] {
		&self.sources
	}

	fn definition(&self, kind: SourceKind) -> Option<&SourceDefinition> {
		self.sources.iter().find(|def| def.kind == kind)
	}

	/// Guarded call of one source, timed
	async fn run_source(definition: SourceDefinition, term: QueryTerm) -> SourceRun {
		let started = Instant::now();
		let label = definition.kind.label();
		debug!("Starting {} fetch for '{}'", label, term);

		let outcome = guard_with_outcome(
			label,
			definition.runtime.timeout_ms,
			definition.adapter.fetch(&term, &definition.runtime),
		)
		.await;
		let duration_ms = started.elapsed().as_millis() as u64;
		let status = outcome.status();

		match &outcome {
			GuardOutcome::Completed(_) => {
				info!("{} completed in {}ms", label, duration_ms)
			},
			GuardOutcome::Failed(_) => {
				info!("{} unavailable after {}ms", label, duration_ms)
			},
			GuardOutcome::TimedOut => {
				info!("{} timed out after {}ms", label, duration_ms)
			},
		}

		SourceRun {
			kind: definition.kind,
			status,
			duration_ms,
			payload: outcome
				.into_option()
				.filter(|payload| payload.kind() == definition.kind),
		}
	}
}

#[async_trait]
impl AggregatorTrait for AggregatorService {
	async fn aggregate(&self, term: &str) -> Result<AggregateResult, AggregatorServiceError> {
		let term = QueryTerm::parse(term)?;
		let request_id = uuid::Uuid::new_v4().to_string();
		let started = Instant::now();

		let enabled: Vec<&SourceDefinition> = self.sources.iter().filter(|d| d.enabled).collect();
		info!(
			"Aggregating '{}' (request {}) across {} sources",
			term,
			request_id,
			enabled.len()
		);

		let tasks = enabled.iter().map(|definition| {
			let definition = (*definition).clone();
			let term = term.clone();
			tokio::spawn(Self::run_source(definition, term))
		});

		let mut runs: Vec<SourceRun> = Vec::with_capacity(self.sources.len());
		for (joined, definition) in join_all(tasks).await.into_iter().zip(enabled.iter()) {
			match joined {
				Ok(run) => runs.push(run),
				Err(e) => {
					warn!("{} task failed: {}", definition.kind.label(), e);
					runs.push(SourceRun {
						kind: definition.kind,
						status: SourceStatus::Unavailable,
						duration_ms: started.elapsed().as_millis() as u64,
						payload: None,
					});
				},
			}
		}

		let results: SourceResults = runs
			.iter_mut()
			.filter_map(|run| run.payload.take())
			.collect();
		let scores = self.scorer.score(&results);

		let reports = self
			.sources
			.iter()
			.map(|definition| match runs.iter().find(|run| run.kind == definition.kind) {
				Some(run) => SourceReport {
					source: run.kind,
					status: run.status,
					duration_ms: run.duration_ms,
					score: scores.for_source(run.kind),
				},
				None => SourceReport {
					source: definition.kind,
					status: SourceStatus::Disabled,
					duration_ms: 0,
					score: 0,
				},
			})
			.collect();

		let total_duration_ms = started.elapsed().as_millis() as u64;
		info!(
			"Aggregation for '{}' completed in {}ms: overall {}",
			term, total_duration_ms, scores.overall
		);

		Ok(AggregateResult {
			success: true,
			scores,
			data: AggregateData {
				results,
				term: term.as_str().to_string(),
			},
			metadata: AggregationMetadata {
				request_id,
				scoring_model: self.scorer.model(),
				total_duration_ms,
				sources: reports,
			},
		})
	}

	async fn fetch_source(
		&self,
		kind: SourceKind,
		term: &str,
	) -> Result<Option<SourcePayload>, AggregatorServiceError> {
		let term = QueryTerm::parse(term)?;
		let definition = self
			.definition(kind)
			.ok_or(AggregatorServiceError::SourceNotConfigured(kind))?;
		if !definition.enabled {
			return Err(AggregatorServiceError::SourceDisabled(kind));
		}

		let run = tokio::spawn(Self::run_source(definition.clone(), term)).await;
		match run {
			Ok(run) => Ok(run.payload),
			Err(e) => {
				warn!("{} task failed: {}", kind.label(), e);
				Ok(None)
			},
		}
	}

	fn source_status(&self) -> Vec<(SourceKind, bool)> {
		self.sources
			.iter()
			.map(|definition| (definition.kind, definition.enabled))
			.collect()
	}

	fn scoring_model(&self) -> ScoringModel {
		self.scorer.model()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bh_types::{
		Adapter, AdapterError, AdapterResult, NewsArticle, NewsData, TrendPoint, TrendsData,
		WikiSummary, WikidataEntity,
	};
	use mockall::mock;
	use std::time::Duration;

	mock! {
		pub Source {}

		#[async_trait]
		impl SourceAdapter for Source {
			fn adapter_info(&self) -> &Adapter;
			fn kind(&self) -> SourceKind;
			async fn fetch(
				&self,
				term: &QueryTerm,
				config: &SourceRuntimeConfig,
			) -> AdapterResult<SourcePayload>;
		}
	}

	impl std::fmt::Debug for MockSource {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("MockSource").finish()
		}
	}

	fn mock_source<F>(kind: SourceKind, calls: usize, respond: F) -> Arc<dyn SourceAdapter>
	where
		F: Fn() -> AdapterResult<SourcePayload> + Send + Sync + 'static,
	{
		let mut mock = MockSource::new();
		mock.expect_kind().return_const(kind);
		mock.expect_fetch().times(calls).returning(move |_, _| respond());
		Arc::new(mock)
	}

	fn definition(adapter: Arc<dyn SourceAdapter>, timeout_ms: u64) -> SourceDefinition {
		let kind = adapter.kind();
		SourceDefinition::new(
			adapter,
			SourceRuntimeConfig::new(kind, "http://127.0.0.1:9").with_timeout_ms(timeout_ms),
		)
	}

	fn acme_sources(calls: impl Fn(SourceKind) -> usize) -> Vec<SourceDefinition> {
		vec![
			definition(
				mock_source(SourceKind::Trends, calls(SourceKind::Trends), || {
					Ok(SourcePayload::Trends(TrendsData::new(vec![
						TrendPoint {
							time: "1".to_string(),
							formatted_time: "a".to_string(),
							value: 40.0,
						},
						TrendPoint {
							time: "2".to_string(),
							formatted_time: "b".to_string(),
							value: 60.0,
						},
					])))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::Wikipedia, calls(SourceKind::Wikipedia), || {
					Ok(SourcePayload::Wikipedia(WikiSummary {
						extract: Some("a".repeat(300)),
						..Default::default()
					}))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::DuckDuckGo, calls(SourceKind::DuckDuckGo), || {
					Err(AdapterError::from_http_failure(500))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::News, calls(SourceKind::News), || {
					Ok(SourcePayload::News(NewsData {
						total_results: 4,
						articles: vec![NewsArticle::default(); 4],
					}))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::Wikidata, calls(SourceKind::Wikidata), || {
					Ok(SourcePayload::Wikidata(WikidataEntity {
						id: "Q1".to_string(),
						..Default::default()
					}))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::Google, calls(SourceKind::Google), || {
					Err(AdapterError::NoData {
						kind: SourceKind::Google,
					})
				}),
				1000,
			),
		]
	}

	#[tokio::test]
	async fn test_aggregate_acme_scenario() {
		let service = AggregatorService::new(acme_sources(|_| 1), Scorer::default());
		let result = service.aggregate("  Acme Corp, ").await.unwrap();

		assert!(result.success);
		assert_eq!(result.scores.search_trend, 50);
		assert_eq!(result.scores.wikipedia, 3);
		assert_eq!(result.scores.news_coverage, 40);
		assert_eq!(result.scores.wikidata, 80);
		assert_eq!(result.scores.overall, 29);
		assert_eq!(result.data.term, "Acme Corp,");
		assert!(result.data.results.ddg.is_none());
		assert!(result.data.results.google.is_none());

		assert_eq!(result.metadata.sources.len(), 6);
		assert_eq!(
			result.report(SourceKind::DuckDuckGo).unwrap().status,
			SourceStatus::Unavailable
		);
		assert_eq!(result.report(SourceKind::News).unwrap().score, 40);
		assert_eq!(result.metadata.scoring_model, ScoringModel::V2);
	}

	#[tokio::test]
	async fn test_empty_term_makes_no_calls() {
		let service = AggregatorService::new(acme_sources(|_| 0), Scorer::default());
		let result = service.aggregate("   ").await;
		assert!(matches!(
			result,
			Err(AggregatorServiceError::Validation(QueryTermError::Empty))
		));
	}

	#[tokio::test]
	async fn test_slow_source_times_out_without_blocking_others() {
		#[derive(Debug)]
		struct Stalled(Adapter);

		#[async_trait]
		impl SourceAdapter for Stalled {
			fn adapter_info(&self) -> &Adapter {
				&self.0
			}
			fn kind(&self) -> SourceKind {
				SourceKind::Trends
			}
			async fn fetch(
				&self,
				_term: &QueryTerm,
				_config: &SourceRuntimeConfig,
			) -> AdapterResult<SourcePayload> {
				std::future::pending().await
			}
		}

		let stalled = Arc::new(Stalled(Adapter::new(
			"stalled".to_string(),
			"Stalled".to_string(),
			"0.0.0".to_string(),
		)));
		let sources = vec![
			definition(stalled, 50),
			definition(
				mock_source(SourceKind::Wikidata, 1, || {
					Ok(SourcePayload::Wikidata(WikidataEntity::default()))
				}),
				1000,
			),
		];
		let service = AggregatorService::new(sources, Scorer::default());

		let started = Instant::now();
		let result = service.aggregate("Acme").await.unwrap();
		assert!(started.elapsed() < Duration::from_secs(2));

		assert_eq!(
			result.report(SourceKind::Trends).unwrap().status,
			SourceStatus::Timeout
		);
		assert!(result.data.results.trends.is_none());
		assert_eq!(result.scores.wikidata, 80);
		assert_eq!(result.scores.overall, 13);
	}

	#[tokio::test]
	async fn test_disabled_source_is_reported_and_scores_zero() {
		let mut sources = acme_sources(|kind| usize::from(kind != SourceKind::News));
		sources[3] = sources[3].clone().with_enabled(false);

		let service = AggregatorService::new(sources, Scorer::default());
		let result = service.aggregate("Acme Corp").await.unwrap();

		let report = result.report(SourceKind::News).unwrap();
		assert_eq!(report.status, SourceStatus::Disabled);
		assert_eq!(report.score, 0);
		assert_eq!(result.scores.news_coverage, 0);
		// (50 + 3 + 0 + 0 + 80 + 0) / 6
		assert_eq!(result.scores.overall, 22);
		assert_eq!(service.source_status()[3], (SourceKind::News, false));
	}

	#[tokio::test]
	async fn test_fetch_source_runs_one_adapter() {
		let sources = vec![
			definition(
				mock_source(SourceKind::Wikidata, 1, || {
					Ok(SourcePayload::Wikidata(WikidataEntity::default()))
				}),
				1000,
			),
			definition(
				mock_source(SourceKind::News, 0, || Ok(SourcePayload::News(NewsData::default()))),
				1000,
			),
		];
		let service = AggregatorService::new(sources, Scorer::default());

		let payload = service
			.fetch_source(SourceKind::Wikidata, "Acme")
			.await
			.unwrap();
		assert!(matches!(payload, Some(SourcePayload::Wikidata(_))));

		let missing = service.fetch_source(SourceKind::Trends, "Acme").await;
		assert!(matches!(
			missing,
			Err(AggregatorServiceError::SourceNotConfigured(SourceKind::Trends))
		));
	}

	#[test]
	fn test_from_settings_resolves_definitions() {
		let mut settings = Settings::default();
		settings.sources.google.enabled = false;
		settings.sources.news.weight = 2.0;

		let registry = AdapterRegistry::from_settings(&settings).unwrap();
		let service = AggregatorService::from_settings(&settings, &registry).unwrap();

		let kinds: Vec<SourceKind> = service.sources().iter().map(|d| d.kind).collect();
		assert_eq!(kinds, SourceKind::ALL.to_vec());
		assert!(!service.sources()[5].enabled);
		assert_eq!(service.sources()[3].weight, 2.0);
		assert_eq!(service.sources()[0].runtime.retry.max_attempts, 5);
		assert_eq!(service.scoring_model(), ScoringModel::V2);

		let empty = AggregatorService::from_settings(&settings, &AdapterRegistry::new());
		assert!(matches!(
			empty,
			Err(AggregatorServiceError::SourceNotConfigured(SourceKind::Trends))
		));
	}
}
