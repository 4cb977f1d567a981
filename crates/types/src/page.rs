//! Metadata extracted from a brand's web page

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Title and meta tags of a page plus the brand name derived from them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
	pub title: String,
	pub meta_description: String,
	pub og_title: String,
	pub og_description: String,
	pub og_site_name: String,
	/// Brand name to feed into an aggregation
	pub suggested_term: String,
}
