//! Optional global request rate limiting

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError, Router};
use bh_config::RateLimitSettings;
use tower::{buffer::BufferLayer, limit::RateLimitLayer, ServiceBuilder};
use tracing::{info, warn};

/// Queue depth in front of the limiter
const BUFFER_CAPACITY: usize = 1024;

/// Wrap `router` in a requests-per-minute limit when enabled
pub fn with_rate_limit<S>(router: Router<S>, settings: &RateLimitSettings) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	if !settings.enabled || settings.requests_per_minute == 0 {
		return router;
	}

	info!(
		"Rate limiting enabled: {} requests per minute",
		settings.requests_per_minute
	);
	router.layer(
		ServiceBuilder::new()
			.layer(HandleErrorLayer::new(handle_limit_error))
			.layer(BufferLayer::new(BUFFER_CAPACITY))
			.layer(RateLimitLayer::new(
				u64::from(settings.requests_per_minute),
				Duration::from_secs(60),
			)),
	)
}

async fn handle_limit_error(err: BoxError) -> (StatusCode, String) {
	warn!("Rate limited request failed: {}", err);
	(
		StatusCode::TOO_MANY_REQUESTS,
		"Too many requests".to_string(),
	)
}
