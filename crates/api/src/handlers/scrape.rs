use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, response::Json};
use bh_types::PageMetadata;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::handlers::common::{error_response, ApiError};
#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScrapeRequest {
	pub url: Option<String>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ScrapeResponse {
	pub success: bool,
	pub data: PageMetadata,
}

/// Extract page metadata and suggest a term to aggregate
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/scrape",
	request_body = ScrapeRequest,
	responses(
		(status = 200, description = "Page metadata", body = ScrapeResponse),
		(status = 400, description = "Missing or non-http(s) URL", body = ErrorResponse),
		(status = 500, description = "Page could not be fetched", body = ErrorResponse)
	),
	tag = "sources"
))]
pub async fn post_scrape(
	State(state): State<AppState>,
	body: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
	let expose = state.expose_error_details();
	let Json(request) = body.map_err(|rejection| {
		error_response(
			StatusCode::INTERNAL_SERVER_ERROR,
			"Failed to read request body",
			Some(rejection.body_text()),
			expose,
		)
	})?;

	let url = request.url.unwrap_or_default();
	if url.trim().is_empty() {
		return Err(error_response(
			StatusCode::BAD_REQUEST,
			"URL is required",
			None,
			expose,
		));
	}

	info!("Scraping metadata for {}", url.trim());
	match state.page_scraper.scrape(&url).await {
		Ok(data) => Ok(Json(ScrapeResponse {
			success: true,
			data,
		})),
		Err(e) if e.is_invalid_input() => Err(error_response(
			StatusCode::BAD_REQUEST,
			e.to_string(),
			None,
			expose,
		)),
		Err(e) => {
			warn!("Scrape of {} failed: {}", url.trim(), e);
			Err(error_response(
				StatusCode::INTERNAL_SERVER_ERROR,
				"Failed to scrape website",
				Some(e.to_string()),
				expose,
			))
		},
	}
}
