//! Error types for adapter operations

use thiserror::Error;

use crate::sources::SourceKind;

/// Adapter operation errors
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("Rate limited by {kind} after {attempts} attempt(s)")]
	RateLimited { kind: SourceKind, attempts: u32 },

	#[error("Missing credential '{credential}' for {kind}")]
	MissingCredential {
		kind: SourceKind,
		credential: String,
	},

	#[error("No data returned by {kind}")]
	NoData { kind: SourceKind },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl AdapterError {
	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			AdapterError::HttpStatusError { status_code, .. } => Some(*status_code),
			AdapterError::HttpError(reqwest_error) => {
				reqwest_error.status().map(|status| status.as_u16())
			},
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatusError {
			status_code,
			reason,
		}
	}

	/// Whether the source simply had nothing for the term
	pub fn is_no_data(&self) -> bool {
		matches!(self, AdapterError::NoData { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_status_code_extraction() {
		let error = AdapterError::from_http_failure(429);
		assert_eq!(error.status_code(), Some(429));
		assert!(error.to_string().contains("Too Many Requests"));

		let error = AdapterError::from_http_failure(418);
		assert_eq!(error.status_code(), Some(418));
		assert!(error.to_string().contains("HTTP Error 418"));

		let error = AdapterError::InvalidResponse {
			reason: "Bad response".to_string(),
		};
		assert_eq!(error.status_code(), None);
	}

	#[test]
	fn test_display_names_source() {
		let error = AdapterError::MissingCredential {
			kind: SourceKind::News,
			credential: "api_key".to_string(),
		};
		assert_eq!(error.to_string(), "Missing credential 'api_key' for news");

		let error = AdapterError::NoData {
			kind: SourceKind::Wikidata,
		};
		assert!(error.is_no_data());
	}
}
