//! News search results

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
	pub title: String,
	pub description: Option<String>,
	pub url: String,
	pub published_at: Option<String>,
	/// Publisher name
	pub source: Option<String>,
}

/// Normalized news payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewsData {
	/// Total matches reported by the provider (articles holds one page)
	pub total_results: u64,
	pub articles: Vec<NewsArticle>,
}
