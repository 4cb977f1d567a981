//! Settings fixtures

use bh_config::{ConfigurableValue, EnvironmentProfile, Settings};
use bh_types::{RetryPolicy, SourceKind};

use super::upstream::FakeUpstream;

/// Settings with every source pointed at the fake upstream
///
/// The trend and news keys are plain values; commercial search has no key,
/// so it reports a zero presence. Backoff is shortened to keep tests fast.
#[allow(dead_code)]
pub fn upstream_settings(upstream: &FakeUpstream) -> Settings {
	let mut settings = Settings::default();
	let sources = &mut settings.sources;

	sources.trends.endpoint = upstream.url("trends");
	sources.trends.api_key = Some(ConfigurableValue::from_plain("test-serp-key"));
	sources.trends.timeout_ms = 3000;
	sources.trends.retry = RetryPolicy {
		max_attempts: 5,
		initial_backoff_ms: 10,
		multiplier: 2,
	};

	sources.wikipedia.endpoint = upstream.url("wiki");
	sources.duckduckgo.endpoint = upstream.url("ddg");
	sources.news.endpoint = upstream.url("news");
	sources.news.api_key = Some(ConfigurableValue::from_plain("test-news-key"));
	sources.wikidata.endpoint = upstream.url("wikidata");

	sources.google.endpoint = upstream.url("google");
	sources.google.api_key = None;
	sources.google.query.search_engine_id = Some(ConfigurableValue::from_plain("test-cx"));

	settings
}

/// Same as `upstream_settings` with a commercial-search key configured
#[allow(dead_code)]
pub fn with_search_key(mut settings: Settings) -> Settings {
	settings.sources.google.api_key = Some(ConfigurableValue::from_plain("test-google-key"));
	settings
}

/// Production profile hides error details
#[allow(dead_code)]
pub fn production(mut settings: Settings) -> Settings {
	settings.environment.profile = EnvironmentProfile::Production;
	settings
}

/// Disable one source
#[allow(dead_code)]
pub fn without(mut settings: Settings, kind: SourceKind) -> Settings {
	settings.sources.get_mut(kind).enabled = false;
	settings
}
