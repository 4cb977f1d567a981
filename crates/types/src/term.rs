//! Validated search term submitted for a brand health assessment

use std::fmt;

use thiserror::Error;

/// Longest term (in characters) accepted for aggregation
pub const MAX_TERM_LENGTH: usize = 200;

/// Validation errors for incoming terms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryTermError {
	#[error("Search term is required")]
	Missing,

	#[error("Search term must not be empty")]
	Empty,

	#[error("Search term exceeds {max} characters (got {actual})")]
	TooLong { max: usize, actual: usize },
}

/// A brand name, free-text term or URL-derived fragment
///
/// Holds both the trimmed input (echoed back to callers) and the cleaned
/// form with trailing commas removed, which is what adapters send upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTerm {
	display: String,
	cleaned: String,
}

impl QueryTerm {
	/// Validate and normalize raw user input
	pub fn parse(input: &str) -> Result<Self, QueryTermError> {
		let display = input.trim();
		if display.is_empty() {
			return Err(QueryTermError::Empty);
		}

		let length = display.chars().count();
		if length > MAX_TERM_LENGTH {
			return Err(QueryTermError::TooLong {
				max: MAX_TERM_LENGTH,
				actual: length,
			});
		}

		let cleaned = display.trim_end_matches(',').trim_end();
		if cleaned.is_empty() {
			return Err(QueryTermError::Empty);
		}

		Ok(Self {
			display: display.to_string(),
			cleaned: cleaned.to_string(),
		})
	}

	/// Validate an optional field from a request body
	pub fn parse_optional(input: Option<&str>) -> Result<Self, QueryTermError> {
		match input {
			Some(value) => Self::parse(value),
			None => Err(QueryTermError::Missing),
		}
	}

	/// Trimmed term as submitted
	pub fn as_str(&self) -> &str {
		&self.display
	}

	/// Term with trailing commas stripped, used for upstream queries
	pub fn cleaned(&self) -> &str {
		&self.cleaned
	}
}

impl fmt::Display for QueryTerm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.display)
	}
}
