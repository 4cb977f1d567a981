use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	/// Internal detail, omitted in production
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
	pub timestamp: i64,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Build an error response; `details` is dropped unless `expose_details`
pub fn error_response(
	status: StatusCode,
	error: impl Into<String>,
	details: Option<String>,
	expose_details: bool,
) -> ApiError {
	(
		status,
		Json(ErrorResponse {
			error: error.into(),
			details: details.filter(|_| expose_details),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_details_hidden_when_not_exposed() {
		let (status, Json(body)) = error_response(
			StatusCode::INTERNAL_SERVER_ERROR,
			"boom",
			Some("stack".to_string()),
			false,
		);
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert!(body.details.is_none());
		let json = serde_json::to_value(&body).unwrap();
		assert!(json.get("details").is_none());

		let (_, Json(body)) =
			error_response(StatusCode::BAD_REQUEST, "bad", Some("why".to_string()), true);
		assert_eq!(body.details.as_deref(), Some("why"));
	}
}
