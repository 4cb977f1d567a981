//! Adapter domain model: identity, runtime configuration and retry policy

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod traits;

pub use errors::AdapterError;
pub use traits::SourceAdapter;

use crate::models::SecretString;
use crate::sources::SourceKind;

/// Result type for adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Default per-source timeout budget
pub const DEFAULT_SOURCE_TIMEOUT_MS: u64 = 5000;

/// Identity of an adapter implementation
#[derive(Debug, Clone, PartialEq)]
pub struct Adapter {
	/// Unique identifier for the adapter
	pub adapter_id: String,
	/// Human-readable name
	pub name: String,
	pub description: Option<String>,
	pub version: String,
}

impl Adapter {
	pub fn new(adapter_id: String, name: String, version: String) -> Self {
		Self {
			adapter_id,
			name,
			description: None,
			version,
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Exponential backoff policy for retrying rate-limited calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
	/// Total attempts including the first; 1 disables retries
	pub max_attempts: u32,
	/// Delay before the first retry
	pub initial_backoff_ms: u64,
	/// Factor applied to the delay after each retry
	pub multiplier: u32,
}

impl RetryPolicy {
	/// Single attempt, no retries
	pub fn none() -> Self {
		Self {
			max_attempts: 1,
			initial_backoff_ms: 0,
			multiplier: 1,
		}
	}

	/// Five attempts, backing off 1s, 2s, 4s, 8s
	///
	/// The backoff counts against the source timeout, so under the default
	/// 5s budget only three attempts fit. See [`RetryPolicy::attempts_within`].
	pub fn rate_limit_default() -> Self {
		Self {
			max_attempts: 5,
			initial_backoff_ms: 1000,
			multiplier: 2,
		}
	}

	/// Delay before retry number `retry` (0-based)
	pub fn backoff(&self, retry: u32) -> Duration {
		let factor = u64::from(self.multiplier).saturating_pow(retry);
		Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
	}

	/// Attempts whose cumulative backoff stays under `window`, capped at `max_attempts`
	pub fn attempts_within(&self, window: Duration) -> u32 {
		let max_attempts = self.max_attempts.max(1);
		let mut waited = Duration::ZERO;
		let mut attempts = 1;
		while attempts < max_attempts {
			waited += self.backoff(attempts - 1);
			if waited >= window {
				break;
			}
			attempts += 1;
		}
		attempts
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self::none()
	}
}

/// Runtime configuration handed to an adapter on every call
#[derive(Debug, Clone)]
pub struct SourceRuntimeConfig {
	pub source: SourceKind,
	/// Base URL of the provider API
	pub endpoint: String,
	/// Budget for the whole call, retries included
	pub timeout_ms: u64,
	pub retry: RetryPolicy,
	pub api_key: Option<SecretString>,
}

impl SourceRuntimeConfig {
	pub fn new(source: SourceKind, endpoint: impl Into<String>) -> Self {
		Self {
			source,
			endpoint: endpoint.into(),
			timeout_ms: DEFAULT_SOURCE_TIMEOUT_MS,
			retry: RetryPolicy::none(),
			api_key: None,
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	pub fn with_api_key(mut self, api_key: SecretString) -> Self {
		self.api_key = Some(api_key);
		self
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	/// API key or a `MissingCredential` error naming this source
	pub fn require_api_key(&self) -> AdapterResult<&SecretString> {
		self.api_key
			.as_ref()
			.filter(|key| !key.is_empty())
			.ok_or_else(|| AdapterError::MissingCredential {
				kind: self.source,
				credential: "api_key".to_string(),
			})
	}
}
