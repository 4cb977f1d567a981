use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::Json};
use bh_service::AggregatorServiceError;
use bh_types::{AggregateResult, QueryTerm};
use serde::Deserialize;
use tracing::{info, warn};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::handlers::common::{error_response, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;

/// Aggregation request body
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AggregateRequest {
	/// Brand name or free-text term
	pub term: Option<String>,
}

/// Score a term across every enabled source
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/aggregate",
	request_body = AggregateRequest,
	responses(
		(status = 200, description = "Scores and raw source results", body = AggregateResult),
		(status = 400, description = "Missing, empty or over-long term", body = ErrorResponse),
		(status = 500, description = "Malformed body or internal error", body = ErrorResponse)
	),
	tag = "aggregate"
))]
pub async fn post_aggregate(
	State(state): State<AppState>,
	body: Result<Json<AggregateRequest>, JsonRejection>,
) -> Result<Json<AggregateResult>, ApiError> {
	let expose = state.expose_error_details();
	let Json(request) = body.map_err(|rejection| {
		warn!("Rejected aggregation body: {}", rejection);
		error_response(
			StatusCode::INTERNAL_SERVER_ERROR,
			"Failed to read request body",
			Some(rejection.body_text()),
			expose,
		)
	})?;

	let term = QueryTerm::parse_optional(request.term.as_deref()).map_err(|e| {
		error_response(StatusCode::BAD_REQUEST, e.to_string(), None, expose)
	})?;

	info!("Received aggregation request for '{}'", term);

	match state.aggregator_service.aggregate(term.as_str()).await {
		Ok(result) => Ok(Json(result)),
		Err(AggregatorServiceError::Validation(e)) => Err(error_response(
			StatusCode::BAD_REQUEST,
			e.to_string(),
			None,
			expose,
		)),
		Err(e) => {
			warn!("Aggregation failed: {}", e);
			Err(error_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				"Failed to aggregate brand health",
				Some(e.to_string()),
				expose,
			))
		},
	}
}
