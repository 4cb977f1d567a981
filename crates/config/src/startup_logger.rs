//! Service startup logging for the brand health aggregator
//!
//! Service information, environment details and a per-source summary so
//! that missing credentials are visible before the first request.

use std::env;
use tracing::{info, warn};

use crate::Settings;

/// Logs service information at startup
pub fn log_service_info() {
	// Use the root package name, not the current crate
	let service_name = "brand-health";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Brand Health Service Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);

	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs which sources are enabled and warns about unresolvable credentials
pub fn log_source_summary(settings: &Settings) {
	info!(
		"📊 Scoring model: {} ({} contributing sources)",
		settings.scoring.model.as_str(),
		settings.scoring.model.contributing_sources().len()
	);

	for (kind, source) in settings.sources.ordered() {
		if !source.enabled {
			info!("⏸️ {} disabled", kind.label());
			continue;
		}

		info!(
			"🔌 {} enabled (timeout {}ms, weight {}, attempts {})",
			kind.label(),
			source.timeout_ms,
			source.weight,
			source.retry.max_attempts
		);

		if let Some(api_key) = &source.api_key {
			if api_key.resolve_optional_secret().is_none() {
				warn!(
					"⚠️ {} has no API key ({} is unset); it will report as unavailable",
					kind.label(),
					api_key.description()
				);
			}
		}
		if let Some(engine_id) = &source.query.search_engine_id {
			if engine_id.resolve_optional_secret().is_none() {
				warn!(
					"⚠️ {} has no search engine id ({} is unset)",
					kind.label(),
					engine_id.description()
				);
			}
		}
	}
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Brand Health Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Brand Health Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📡 Ready to accept requests");
}
