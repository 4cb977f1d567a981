use std::collections::BTreeMap;

use axum::{extract::State, response::Json};
use bh_types::ScoringModel;
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check endpoint
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/health",
	responses((status = 200, description = "Service healthy", body = String)),
	tag = "health"
))]
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
	pub status: String,
	pub scoring_model: ScoringModel,
	/// Source name to enabled flag
	pub sources: BTreeMap<String, bool>,
}

/// GET /ready - Configured sources; upstreams are not probed
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/ready",
	responses((status = 200, description = "Readiness response", body = ReadinessResponse)),
	tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
	let sources = state
		.aggregator_service
		.source_status()
		.into_iter()
		.map(|(kind, enabled)| (kind.as_str().to_string(), enabled))
		.collect();

	Json(ReadinessResponse {
		status: "ready".to_string(),
		scoring_model: state.aggregator_service.scoring_model(),
		sources,
	})
}
