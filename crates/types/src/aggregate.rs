//! Aggregation response envelope

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::scores::{Scores, ScoringModel};
use crate::sources::{SourceKind, SourceResults};

/// Raw source results plus the term they were fetched for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AggregateData {
	#[serde(flatten)]
	pub results: SourceResults,
	pub term: String,
}

/// How a source call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
	Success,
	Unavailable,
	Timeout,
	Disabled,
}

/// Per-source diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
	pub source: SourceKind,
	pub status: SourceStatus,
	pub duration_ms: u64,
	pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AggregationMetadata {
	pub request_id: String,
	pub scoring_model: ScoringModel,
	pub total_duration_ms: u64,
	pub sources: Vec<SourceReport>,
}

/// Body of a successful aggregation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AggregateResult {
	pub success: bool,
	pub scores: Scores,
	pub data: AggregateData,
	pub metadata: AggregationMetadata,
}

impl AggregateResult {
	/// Report for a single source, if it was part of the run
	pub fn report(&self, kind: SourceKind) -> Option<&SourceReport> {
		self.metadata.sources.iter().find(|r| r.source == kind)
	}
}
