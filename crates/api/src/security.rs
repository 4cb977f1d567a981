//! Response security headers driven by `server.security_headers`

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use bh_config::Settings;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, warn};

/// Header set for the active profile
///
/// `Strict-Transport-Security` is only sent under the production profile,
/// where the service sits behind TLS. Values that are not valid header
/// values are skipped.
pub fn security_headers(settings: &Settings) -> Vec<(HeaderName, HeaderValue)> {
	let config = &settings.server.security_headers;
	if !config.enabled {
		return Vec::new();
	}

	let mut headers = vec![(
		HeaderName::from_static("x-content-type-options"),
		HeaderValue::from_static("nosniff"),
	)];

	if settings.is_production() {
		let hsts = format!("max-age={}; includeSubDomains", config.hsts_max_age_secs);
		if let Ok(value) = HeaderValue::from_str(&hsts) {
			headers.push((HeaderName::from_static("strict-transport-security"), value));
		}
	}

	for (name, value) in config.configured_values() {
		if value.is_empty() {
			continue;
		}
		match HeaderValue::from_str(value) {
			Ok(value) => headers.push((HeaderName::from_static(name), value)),
			Err(_) => warn!("Skipping invalid value for security header {}", name),
		}
	}

	headers
}

/// Stamp the configured security headers on every response that lacks them
pub fn with_security_headers<S>(router: Router<S>, settings: &Settings) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	let headers = security_headers(settings);
	debug!("Applying {} security header(s)", headers.len());
	headers.into_iter().fold(router, |router, (name, value)| {
		router.layer(SetResponseHeaderLayer::if_not_present(name, value))
	})
}
