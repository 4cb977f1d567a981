//! Configuration settings structures

use crate::configurable_value::ConfigurableValue;
use bh_types::{RetryPolicy, ScoringConstants, ScoringModel, SourceKind, DEFAULT_SOURCE_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub server: ServerSettings,
	pub sources: SourcesSettings,
	pub scoring: ScoringSettings,
	pub http: HttpSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
	pub security_headers: SecurityHeadersSettings,
}

/// Headers stamped on every API response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SecurityHeadersSettings {
	pub enabled: bool,
	/// `Strict-Transport-Security` max-age; only sent under the production profile
	pub hsts_max_age_secs: u64,
	pub frame_options: String,
	pub content_security_policy: String,
	pub cache_control: String,
}

impl Default for SecurityHeadersSettings {
	fn default() -> Self {
		Self {
			enabled: true,
			hsts_max_age_secs: 31_536_000,
			frame_options: "DENY".to_string(),
			content_security_policy: "default-src 'self'".to_string(),
			cache_control: "no-store".to_string(),
		}
	}
}

impl SecurityHeadersSettings {
	/// Configured header values by header name
	pub fn configured_values(&self) -> [(&'static str, &str); 3] {
		[
			("x-frame-options", self.frame_options.as_str()),
			("content-security-policy", self.content_security_policy.as_str()),
			("cache-control", self.cache_control.as_str()),
		]
	}
}

/// One entry per data source
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourcesSettings {
	pub trends: SourceSettings,
	pub wikipedia: SourceSettings,
	pub duckduckgo: SourceSettings,
	pub news: SourceSettings,
	pub wikidata: SourceSettings,
	pub google: SourceSettings,
}

/// Settings of a single data source
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceSettings {
	pub enabled: bool,
	/// Base URL of the provider API
	pub endpoint: String,
	/// Budget for the whole call, retries included
	pub timeout_ms: u64,
	/// Weight in the overall mean
	pub weight: f64,
	pub retry: RetryPolicy,
	#[serde(default)]
	pub api_key: Option<ConfigurableValue>,
	#[serde(default)]
	pub query: QueryOptions,
}

/// Source-specific query shaping; unused fields are ignored by other sources
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct QueryOptions {
	/// Suffix tried first on encyclopedia lookups, e.g. "(company)"
	#[serde(default)]
	pub disambiguation_suffix: Option<String>,
	/// Custom search engine id for commercial search
	#[serde(default)]
	pub search_engine_id: Option<ConfigurableValue>,
	/// Keywords appended to the commercial-search query
	#[serde(default)]
	pub keywords: Vec<String>,
	/// Domains excluded from commercial search with `-site:`
	#[serde(default)]
	pub excluded_sites: Vec<String>,
	#[serde(default)]
	pub language: Option<String>,
	#[serde(default)]
	pub page_size: Option<u32>,
}

/// Scoring configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ScoringSettings {
	pub model: ScoringModel,
	pub constants: ScoringConstants,
}

/// Outbound HTTP configuration shared by adapters and the page scraper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpSettings {
	pub user_agent: String,
	pub scrape_timeout_ms: u64,
	/// Largest HTML body the scraper will read
	pub scrape_max_bytes: usize,
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Global rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Invalid configuration detected at startup
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
	#[error("Server port must be non-zero")]
	InvalidPort,

	#[error("Source '{source_name}' has a zero timeout")]
	ZeroTimeout { source_name: String },

	#[error("Source '{source_name}' has invalid weight {weight}")]
	InvalidWeight { source_name: String, weight: f64 },

	#[error("Source '{source_name}' retry policy needs at least one attempt")]
	InvalidRetry { source_name: String },

	#[error("Source '{source_name}' has invalid endpoint '{endpoint}'")]
	InvalidEndpoint {
		source_name: String,
		endpoint: String,
	},

	#[error("Scoring model {model} has no positively weighted source")]
	NoContributingWeight { model: String },

	#[error("Scrape timeout must be non-zero")]
	InvalidScrapeTimeout,

	#[error("Security header '{header}' has a value that is not visible ASCII")]
	InvalidSecurityHeader { header: String },
}

impl SourceSettings {
	fn new(endpoint: &str) -> Self {
		Self {
			enabled: true,
			endpoint: endpoint.to_string(),
			timeout_ms: DEFAULT_SOURCE_TIMEOUT_MS,
			weight: 1.0,
			retry: RetryPolicy::none(),
			api_key: None,
			query: QueryOptions::default(),
		}
	}

	fn with_api_key_env(mut self, env_var: &str) -> Self {
		self.api_key = Some(ConfigurableValue::from_env(env_var));
		self
	}
}

impl Default for SourcesSettings {
	fn default() -> Self {
		let mut trends = SourceSettings::new("https://serpapi.com").with_api_key_env("SERP_API_KEY");
		trends.retry = RetryPolicy::rate_limit_default();

		let mut wikipedia = SourceSettings::new("https://en.wikipedia.org/api/rest_v1");
		wikipedia.query.disambiguation_suffix = Some("(company)".to_string());

		let mut news = SourceSettings::new("https://newsapi.org/v2").with_api_key_env("NEWS_API_KEY");
		news.query.language = Some("en".to_string());
		news.query.page_size = Some(10);

		let mut google = SourceSettings::new("https://www.googleapis.com/customsearch/v1")
			.with_api_key_env("GOOGLE_API_KEY");
		google.query.search_engine_id = Some(ConfigurableValue::from_env("GOOGLE_CSE_ID"));
		google.query.page_size = Some(10);

		Self {
			trends,
			wikipedia,
			duckduckgo: SourceSettings::new("https://api.duckduckgo.com"),
			news,
			wikidata: SourceSettings::new("https://www.wikidata.org/w/api.php"),
			google,
		}
	}
}

impl SourcesSettings {
	pub fn get(&self, kind: SourceKind) -> &SourceSettings {
		match kind {
			SourceKind::Trends => &self.trends,
			SourceKind::Wikipedia => &self.wikipedia,
			SourceKind::DuckDuckGo => &self.duckduckgo,
			SourceKind::News => &self.news,
			SourceKind::Wikidata => &self.wikidata,
			SourceKind::Google => &self.google,
		}
	}

	pub fn get_mut(&mut self, kind: SourceKind) -> &mut SourceSettings {
		match kind {
			SourceKind::Trends => &mut self.trends,
			SourceKind::Wikipedia => &mut self.wikipedia,
			SourceKind::DuckDuckGo => &mut self.duckduckgo,
			SourceKind::News => &mut self.news,
			SourceKind::Wikidata => &mut self.wikidata,
			SourceKind::Google => &mut self.google,
		}
	}

	/// All sources in reporting order
	pub fn ordered(&self) -> Vec<(SourceKind, &SourceSettings)> {
		SourceKind::ALL
			.into_iter()
			.map(|kind| (kind, self.get(kind)))
			.collect()
	}
}

impl Default for HttpSettings {
	fn default() -> Self {
		Self {
			user_agent: format!("BrandHealth/{}", env!("CARGO_PKG_VERSION")),
			scrape_timeout_ms: 10_000,
			scrape_max_bytes: 2 * 1024 * 1024,
		}
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings {
				host: "0.0.0.0".to_string(),
				port: 3000,
				security_headers: SecurityHeadersSettings::default(),
			},
			sources: SourcesSettings::default(),
			scoring: ScoringSettings::default(),
			http: HttpSettings::default(),
			environment: EnvironmentSettings {
				profile: EnvironmentProfile::Development,
				debug: true,
				rate_limiting: RateLimitSettings {
					enabled: false,
					requests_per_minute: 100,
				},
			},
			logging: LoggingSettings {
				level: "info".to_string(),
				format: LogFormat::Pretty,
				structured: false,
			},
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Check if running in production
	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	/// Check if debug mode is enabled
	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Whether error responses may carry internal details
	pub fn expose_error_details(&self) -> bool {
		!self.is_production()
	}

	/// Enabled sources in reporting order
	pub fn enabled_sources(&self) -> Vec<(SourceKind, &SourceSettings)> {
		self.sources
			.ordered()
			.into_iter()
			.filter(|(_, source)| source.enabled)
			.collect()
	}

	/// Reject settings the service cannot run with
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.port == 0 {
			return Err(ConfigValidationError::InvalidPort);
		}
		if self.http.scrape_timeout_ms == 0 {
			return Err(ConfigValidationError::InvalidScrapeTimeout);
		}
		for (header, value) in self.server.security_headers.configured_values() {
			let visible = value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b));
			if !visible {
				return Err(ConfigValidationError::InvalidSecurityHeader {
					header: header.to_string(),
				});
			}
		}

		for (kind, source) in self.sources.ordered() {
			let source_name = kind.as_str().to_string();
			if source.timeout_ms == 0 {
				return Err(ConfigValidationError::ZeroTimeout { source_name });
			}
			if !source.weight.is_finite() || source.weight < 0.0 {
				return Err(ConfigValidationError::InvalidWeight {
					source_name,
					weight: source.weight,
				});
			}
			if source.retry.max_attempts == 0 {
				return Err(ConfigValidationError::InvalidRetry { source_name });
			}
			if !(source.endpoint.starts_with("http://") || source.endpoint.starts_with("https://"))
			{
				return Err(ConfigValidationError::InvalidEndpoint {
					source_name,
					endpoint: source.endpoint.clone(),
				});
			}
		}

		let contributing_weight: f64 = self
			.scoring
			.model
			.contributing_sources()
			.iter()
			.map(|kind| self.sources.get(*kind).weight)
			.sum();
		if contributing_weight <= 0.0 {
			return Err(ConfigValidationError::NoContributingWeight {
				model: self.scoring.model.as_str().to_string(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_settings_are_valid() {
		let settings = Settings::default();
		assert!(settings.validate().is_ok());
		assert_eq!(settings.bind_address(), "0.0.0.0:3000");
		assert_eq!(settings.enabled_sources().len(), 6);
		assert!(settings.expose_error_details());
	}

	#[test]
	fn test_defaults_match_provider_contracts() {
		let sources = SourcesSettings::default();
		for (_, source) in sources.ordered() {
			assert_eq!(source.timeout_ms, 5000);
			assert_eq!(source.weight, 1.0);
		}
		assert_eq!(sources.trends.retry, RetryPolicy::rate_limit_default());
		assert_eq!(sources.news.retry, RetryPolicy::none());
		assert_eq!(
			sources.wikipedia.query.disambiguation_suffix.as_deref(),
			Some("(company)")
		);
		assert!(sources.duckduckgo.api_key.is_none());
		assert_eq!(
			sources.google.query.search_engine_id,
			Some(ConfigurableValue::from_env("GOOGLE_CSE_ID"))
		);
	}

	#[test]
	fn test_production_hides_error_details() {
		let mut settings = Settings::default();
		settings.environment.profile = EnvironmentProfile::Production;
		assert!(settings.is_production());
		assert!(!settings.is_debug());
		assert!(!settings.expose_error_details());
	}

	#[test]
	fn test_validate_rejects_unprintable_header_values() {
		let mut settings = Settings::default();
		settings.server.security_headers.frame_options = "DENY\nX-Injected: 1".to_string();
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::InvalidSecurityHeader {
				header: "x-frame-options".to_string()
			})
		);
	}

	#[test]
	fn test_validate_rejects_bad_sources() {
		let mut settings = Settings::default();
		settings.sources.news.timeout_ms = 0;
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::ZeroTimeout {
				source_name: "news".to_string()
			})
		);

		let mut settings = Settings::default();
		settings.sources.google.weight = f64::NAN;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidWeight { .. })
		));

		let mut settings = Settings::default();
		settings.sources.trends.retry.max_attempts = 0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidRetry { .. })
		));

		let mut settings = Settings::default();
		settings.sources.wikidata.endpoint = "ftp://example.com".to_string();
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::InvalidEndpoint { .. })
		));
	}

	#[test]
	fn test_validate_requires_contributing_weight() {
		let mut settings = Settings::default();
		settings.scoring.model = ScoringModel::V1;
		for kind in ScoringModel::V1.contributing_sources() {
			settings.sources.get_mut(*kind).weight = 0.0;
		}
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::NoContributingWeight {
				model: "v1".to_string()
			})
		);
	}
}
