//! Encyclopedia page summary

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Normalized encyclopedia summary payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WikiSummary {
	pub title: Option<String>,
	pub description: Option<String>,
	pub extract: Option<String>,
	pub page_url: Option<String>,
}

impl WikiSummary {
	/// Length of the extract in characters, 0 when absent
	pub fn extract_chars(&self) -> usize {
		self.extract
			.as_deref()
			.map(|text| text.chars().count())
			.unwrap_or(0)
	}
}
