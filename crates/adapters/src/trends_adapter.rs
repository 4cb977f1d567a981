//! Search-interest time series via SerpApi's Google Trends engine
//!
//! Failures never escape as `Err`: a non-retryable failure yields an empty
//! series with the reason embedded, and exhausted rate-limit retries yield
//! a synthetic flat series.

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterResult, QueryTerm, SecretString, SourceAdapter, SourceKind, SourcePayload,
	SourceRuntimeConfig, TrendPoint, TrendsData, FLAT_SERIES_WEEKS,
};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info, warn};
use url::Url;

use crate::http::{build_url, redacted};

/// Share of the source timeout (1/n) held back from the retry window
const DEADLINE_RESERVE_DIVISOR: u32 = 10;

#[derive(Debug, Deserialize)]
struct SerpTrendsResponse {
	interest_over_time: Option<InterestOverTime>,
}

#[derive(Debug, Deserialize)]
struct InterestOverTime {
	timeline_data: Option<Vec<SerpTimelinePoint>>,
}

#[derive(Debug, Deserialize)]
struct SerpTimelinePoint {
	#[serde(default)]
	date: String,
	#[serde(default)]
	timestamp: String,
	#[serde(default)]
	values: Vec<SerpValue>,
}

#[derive(Debug, Deserialize)]
struct SerpValue {
	#[serde(default)]
	extracted_value: f64,
}

/// Outcome of one upstream request
#[derive(Debug)]
enum Attempt {
	Success(TrendsData),
	/// 429, HTML instead of JSON, or JSON without a timeline
	RateLimited(String),
	Failed(String),
}

/// Trend-series adapter
#[derive(Debug)]
pub struct TrendsAdapter {
	config: Adapter,
	client: Client,
}

impl TrendsAdapter {
	pub fn new(client: Client) -> Self {
		let config = Adapter::new(
			"serpapi-trends".to_string(),
			"SerpApi Google Trends".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Weekly search interest over the past year");

		Self { config, client }
	}

	fn request_url(
		&self,
		term: &QueryTerm,
		endpoint: &str,
		api_key: &SecretString,
	) -> AdapterResult<Url> {
		let mut url = build_url(endpoint, "search.json")?;
		url.query_pairs_mut()
			.append_pair("engine", "google_trends")
			.append_pair("data_type", "TIMESERIES")
			.append_pair("q", term.cleaned())
			.append_pair("api_key", api_key.expose_secret());
		Ok(url)
	}

	async fn attempt(&self, url: Url) -> Attempt {
		let response = match self.client.get(url).send().await {
			Ok(response) => response,
			Err(e) => return Attempt::Failed(e.to_string()),
		};

		let status = response.status();
		if status == StatusCode::TOO_MANY_REQUESTS {
			return Attempt::RateLimited("SerpAPI returned 429".to_string());
		}
		if !status.is_success() {
			return Attempt::Failed(format!("SerpAPI returned {}", status.as_u16()));
		}

		match response.text().await {
			Ok(body) => parse_body(&body),
			Err(e) => Attempt::Failed(e.to_string()),
		}
	}

	/// Run attempts until success, a hard failure, or the retry window closes
	///
	/// Retries run against a deadline short of the source timeout; a retry
	/// still pending there is dropped in favour of the flat series.
	async fn fetch_series(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
		url: Url,
	) -> TrendsData {
		let budget = config.timeout();
		let window = budget.saturating_sub(budget / DEADLINE_RESERVE_DIVISOR);
		let deadline = Instant::now() + window;
		let max_attempts = config.retry.attempts_within(window);

		for attempt in 1..=max_attempts {
			// The first attempt is bounded by the caller's timeout alone
			let outcome = if attempt == 1 {
				self.attempt(url.clone()).await
			} else {
				match timeout_at(deadline, self.attempt(url.clone())).await {
					Ok(outcome) => outcome,
					Err(_) => {
						warn!(
							"Trends retry {} for '{}' still pending at the {}ms deadline",
							attempt,
							term,
							window.as_millis()
						);
						break;
					},
				}
			};

			match outcome {
				Attempt::Success(data) => {
					info!(
						"Retrieved {} trend points for '{}' on attempt {}",
						data.timeline_data.len(),
						term,
						attempt
					);
					return data;
				},
				Attempt::Failed(reason) => {
					warn!("Trends request for '{}' failed: {}", term, reason);
					return TrendsData::failed(reason);
				},
				Attempt::RateLimited(reason) => {
					if attempt == max_attempts {
						warn!(
							"Trends rate limited for '{}' on final attempt {}: {}",
							term, attempt, reason
						);
						break;
					}

					let delay = config.retry.backoff(attempt - 1);
					if Instant::now() + delay >= deadline {
						warn!(
							"Trends rate limited for '{}'; {}ms backoff would pass the {}ms deadline",
							term,
							delay.as_millis(),
							window.as_millis()
						);
						break;
					}

					warn!(
						"Trends rate limited for '{}' (attempt {}/{}): {}; retrying in {}ms",
						term,
						attempt,
						max_attempts,
						reason,
						delay.as_millis()
					);
					tokio::time::sleep(delay).await;
				},
			}
		}

		warn!(
			"Synthesizing flat {}-week trend series for '{}'",
			FLAT_SERIES_WEEKS, term
		);
		TrendsData::flat(FLAT_SERIES_WEEKS, Utc::now())
	}
}

fn parse_body(body: &str) -> Attempt {
	if body.trim_start().starts_with('<') {
		return Attempt::RateLimited("received HTML instead of JSON".to_string());
	}

	let parsed: SerpTrendsResponse = match serde_json::from_str(body) {
		Ok(parsed) => parsed,
		Err(e) => return Attempt::Failed(format!("invalid JSON: {}", e)),
	};

	match parsed.interest_over_time.and_then(|iot| iot.timeline_data) {
		Some(points) => Attempt::Success(TrendsData::new(
			points.into_iter().map(into_trend_point).collect(),
		)),
		None => Attempt::RateLimited("No trends data available".to_string()),
	}
}

fn into_trend_point(point: SerpTimelinePoint) -> TrendPoint {
	TrendPoint {
		time: point.timestamp,
		formatted_time: point.date,
		value: point
			.values
			.first()
			.map(|v| v.extracted_value)
			.unwrap_or(0.0),
	}
}

#[async_trait]
impl SourceAdapter for TrendsAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::Trends
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let api_key = match config.require_api_key() {
			Ok(key) => key,
			Err(e) => {
				warn!("Trends adapter cannot run: {}", e);
				return Ok(SourcePayload::Trends(TrendsData::failed(e.to_string())));
			},
		};

		let url = match self.request_url(term, &config.endpoint, api_key) {
			Ok(url) => url,
			Err(e) => return Ok(SourcePayload::Trends(TrendsData::failed(e.to_string()))),
		};
		debug!("Fetching trends for '{}' from {}", term, redacted(&url));

		let data = self.fetch_series(term, config, url).await;
		Ok(SourcePayload::Trends(data))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_timeline() {
		let body = r#"{
			"interest_over_time": {
				"timeline_data": [
					{"date": "Jan 1 – 7, 2024", "timestamp": "1704067200", "values": [{"query": "acme", "value": "40", "extracted_value": 40}]},
					{"date": "Jan 8 – 14, 2024", "timestamp": "1704672000", "values": [{"query": "acme", "value": "60", "extracted_value": 60}]}
				]
			}
		}"#;

		match parse_body(body) {
			Attempt::Success(data) => {
				assert_eq!(data.timeline_data.len(), 2);
				assert_eq!(data.timeline_data[0].time, "1704067200");
				assert_eq!(data.timeline_data[1].value, 60.0);
				assert_eq!(data.mean_value(), Some(50.0));
			},
			other => panic!("expected success, got {:?}", other),
		}
	}

	#[test]
	fn test_missing_timeline_counts_as_rate_limited() {
		assert!(matches!(
			parse_body(r#"{"search_metadata": {"status": "Success"}}"#),
			Attempt::RateLimited(_)
		));
		assert!(matches!(
			parse_body("<!DOCTYPE html><html><body>Too many requests</body></html>"),
			Attempt::RateLimited(_)
		));
	}

	#[test]
	fn test_invalid_json_is_a_hard_failure() {
		assert!(matches!(parse_body("not json"), Attempt::Failed(_)));
	}

	#[test]
	fn test_point_without_values_is_zero() {
		let point = into_trend_point(SerpTimelinePoint {
			date: "Jan 1, 2024".to_string(),
			timestamp: "1704067200".to_string(),
			values: Vec::new(),
		});
		assert_eq!(point.value, 0.0);
	}

	#[tokio::test]
	async fn test_missing_key_yields_failed_series() {
		let adapter = TrendsAdapter::new(Client::new());
		let config = SourceRuntimeConfig::new(SourceKind::Trends, "http://127.0.0.1:9");
		let term = QueryTerm::parse("Acme").unwrap();

		let payload = adapter.fetch(&term, &config).await.unwrap();
		match payload {
			SourcePayload::Trends(data) => {
				assert!(data.timeline_data.is_empty());
				assert!(data.error.unwrap().contains("api_key"));
			},
			other => panic!("unexpected payload {:?}", other),
		}
	}

	#[test]
	fn test_request_url_carries_query() {
		let adapter = TrendsAdapter::new(Client::new());
		let term = QueryTerm::parse("Acme Corp,").unwrap();
		let url = adapter
			.request_url(&term, "https://serpapi.com", &SecretString::from("k"))
			.unwrap();

		assert_eq!(url.path(), "/search.json");
		let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
		assert!(pairs.contains(&("engine".to_string(), "google_trends".to_string())));
		assert!(pairs.contains(&("q".to_string(), "Acme Corp".to_string())));
	}
}
