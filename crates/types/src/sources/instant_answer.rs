//! Web-search aggregator instant answer

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A related topic (or a named topic group) listed by the instant answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RelatedTopic {
	pub text: Option<String>,
	pub first_url: Option<String>,
}

/// Normalized instant-answer payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InstantAnswer {
	pub heading: Option<String>,
	pub abstract_text: Option<String>,
	pub abstract_url: Option<String>,
	pub related_topics: Vec<RelatedTopic>,
}
