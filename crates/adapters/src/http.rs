//! Shared HTTP plumbing for the source adapters
//!
//! Every adapter owns one pooled `reqwest::Client` built here at startup.

use bh_types::{AdapterError, AdapterResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Connection pool settings applied to every adapter client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub user_agent: String,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
}

impl ClientConfig {
	pub fn new(user_agent: impl Into<String>) -> Self {
		Self {
			user_agent: user_agent.into(),
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
		}
	}
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self::new(format!("BrandHealth/{}", env!("CARGO_PKG_VERSION")))
	}
}

/// Build a pooled client that accepts JSON
pub fn build_client(config: &ClientConfig) -> AdapterResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

	ClientBuilder::new()
		.user_agent(config.user_agent.as_str())
		.default_headers(headers)
		.pool_max_idle_per_host(config.max_idle_per_host)
		.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
		.tcp_keepalive(Duration::from_secs(60))
		.build()
		.map_err(AdapterError::HttpError)
}

/// Join `path` onto `base_url`, treating the base as a directory
pub fn build_url(base_url: &str, path: &str) -> AdapterResult<Url> {
	let mut base = Url::parse(base_url).map_err(|e| AdapterError::ConfigError {
		reason: format!("Invalid base URL '{}': {}", base_url, e),
	})?;

	if !base.path().ends_with('/') {
		base.set_path(&format!("{}/", base.path()));
	}

	base.join(path.trim_start_matches('/'))
		.map_err(|e| AdapterError::ConfigError {
			reason: format!(
				"Failed to join URL path '{}' to base '{}': {}",
				path, base_url, e
			),
		})
}

/// Parse an endpoint that is used as-is
pub fn parse_endpoint(endpoint: &str) -> AdapterResult<Url> {
	Url::parse(endpoint).map_err(|e| AdapterError::ConfigError {
		reason: format!("Invalid endpoint '{}': {}", endpoint, e),
	})
}

/// Turn a non-2xx response into `HttpStatusError`
pub fn ensure_success(response: Response) -> AdapterResult<Response> {
	let status = response.status();
	if status.is_success() {
		Ok(response)
	} else {
		Err(AdapterError::from_http_failure(status.as_u16()))
	}
}

/// Check the status and decode a JSON body
pub async fn read_json<T: DeserializeOwned>(response: Response) -> AdapterResult<T> {
	let response = ensure_success(response)?;
	let body = response.text().await?;
	debug!("Upstream responded with {} bytes", body.len());

	serde_json::from_str(&body).map_err(|e| AdapterError::InvalidResponse {
		reason: format!("Failed to parse response body: {}", e),
	})
}

/// URL rendered for logs with credential parameters masked
pub fn redacted(url: &Url) -> String {
	let mut masked = url.clone();
	let pairs: Vec<(String, String)> = url
		.query_pairs()
		.map(|(key, value)| {
			let value = match key.as_ref() {
				"api_key" | "key" | "apiKey" => "[REDACTED]".to_string(),
				_ => value.into_owned(),
			};
			(key.into_owned(), value)
		})
		.collect();

	if !pairs.is_empty() {
		masked.query_pairs_mut().clear().extend_pairs(pairs);
	}
	masked.to_string()
}
