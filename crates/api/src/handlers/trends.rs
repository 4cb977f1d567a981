use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::Json};
use bh_service::AggregatorServiceError;
use bh_types::{SourceKind, SourcePayload, TrendsData};
use serde::Deserialize;
use tracing::{debug, warn};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::handlers::common::{error_response, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;

/// Trend lookup body; `url` may also be a bare term
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TrendsRequest {
	pub url: Option<String>,
}

/// Term for a trend lookup: the host of an absolute URL without `www.`,
/// otherwise the input itself
pub fn trend_term(input: &str) -> String {
	let input = input.trim();
	url::Url::parse(input)
		.ok()
		.and_then(|url| url.host_str().map(|host| host.trim_start_matches("www.").to_string()))
		.filter(|host| !host.is_empty())
		.unwrap_or_else(|| input.to_string())
}

/// Fetch the search-interest series for a site or term
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/trends",
	request_body = TrendsRequest,
	responses(
		(status = 200, description = "Trend series", body = TrendsData),
		(status = 400, description = "Empty input", body = ErrorResponse),
		(status = 404, description = "No non-zero data point", body = ErrorResponse),
		(status = 500, description = "Internal error", body = ErrorResponse),
		(status = 503, description = "Trend source disabled", body = ErrorResponse)
	),
	tag = "sources"
))]
pub async fn post_trends(
	State(state): State<AppState>,
	body: Result<Json<TrendsRequest>, JsonRejection>,
) -> Result<Json<TrendsData>, ApiError> {
	let expose = state.expose_error_details();
	let Json(request) = body.map_err(|rejection| {
		error_response(
			StatusCode::INTERNAL_SERVER_ERROR,
			"Failed to read request body",
			Some(rejection.body_text()),
			expose,
		)
	})?;

	let input = request.url.unwrap_or_default();
	if input.trim().is_empty() {
		return Err(error_response(
			StatusCode::BAD_REQUEST,
			"URL or search term is required",
			None,
			expose,
		));
	}

	let term = trend_term(&input);
	debug!("Trend lookup for '{}'", term);

	match state
		.aggregator_service
		.fetch_source(SourceKind::Trends, &term)
		.await
	{
		Ok(Some(SourcePayload::Trends(data))) if data.has_data() => Ok(Json(data)),
		Ok(Some(SourcePayload::Trends(_))) => Err(error_response(
			StatusCode::NOT_FOUND,
			"No trend data available for this search term",
			None,
			expose,
		)),
		Ok(_) => Err(error_response(
			StatusCode::INTERNAL_SERVER_ERROR,
			"Failed to fetch trends data",
			None,
			expose,
		)),
		Err(AggregatorServiceError::Validation(e)) => Err(error_response(
			StatusCode::BAD_REQUEST,
			e.to_string(),
			None,
			expose,
		)),
		Err(e @ AggregatorServiceError::SourceDisabled(_)) => Err(error_response(
			StatusCode::SERVICE_UNAVAILABLE,
			"Trend source is disabled",
			Some(e.to_string()),
			expose,
		)),
		Err(e) => {
			warn!("Trend lookup failed: {}", e);
			Err(error_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				"Failed to fetch trends data",
				Some(e.to_string()),
				expose,
			))
		},
	}
}
