//! Knowledge-graph entity

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// First entity matching the term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct WikidataEntity {
	pub id: String,
	pub label: Option<String>,
	pub description: Option<String>,
	pub concept_uri: Option<String>,
	pub aliases: Vec<String>,
}
