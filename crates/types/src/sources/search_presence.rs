//! Commercial search-engine presence

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
	pub title: String,
	pub link: String,
	pub snippet: Option<String>,
	pub display_link: Option<String>,
}

/// Search results already scored by the commercial-search adapter
///
/// The default value is the zero-valued object returned when the
/// provider cannot be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchPresence {
	pub score: u32,
	pub total_results: u64,
	pub exact_matches: u32,
	pub authority_score: u32,
	pub items: Vec<SearchItem>,
}
