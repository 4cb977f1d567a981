//! Configuration loading utilities
//!
//! Layers, lowest precedence first: built-in defaults, the optional
//! `config/config.{toml,json,yaml}` file, then `BRAND_HEALTH__*` environment
//! variables (e.g. `BRAND_HEALTH__SERVER__PORT=8080`).

use crate::settings::ConfigValidationError;
use crate::Settings;
use config::{Config, ConfigError, Environment, File};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config/config";
const ENV_PREFIX: &str = "BRAND_HEALTH";

/// Errors raised while building the settings
#[derive(Error, Debug)]
pub enum ConfigLoadError {
	#[error("Failed to load configuration: {0}")]
	Source(#[from] ConfigError),

	#[error("Invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from the default file location and environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
	load_config_from(&path)
}

/// Load configuration using `path` (without extension) as the optional file
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	let defaults = Config::try_from(&Settings::default())?;

	let s = Config::builder()
		.add_source(defaults)
		.add_source(File::with_name(path).required(false))
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.prefix_separator("__")
				.separator("__")
				.try_parsing(true),
		)
		.build()?;

	let settings: Settings = s.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_missing_file_falls_back_to_defaults() {
		let settings = load_config_from("definitely/not/here").unwrap();
		assert_eq!(settings.server.port, Settings::default().server.port);
		assert_eq!(settings.sources.trends.retry.max_attempts, 5);
		assert!(settings.sources.google.api_key.is_some());
	}

	#[test]
	fn test_file_overrides_defaults() {
		let dir = std::env::temp_dir().join(format!("bh-config-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let file = dir.join("override.toml");
		let mut handle = std::fs::File::create(&file).unwrap();
		writeln!(
			handle,
			"[server]\nport = 8088\n\n[sources.news]\nenabled = false\ntimeout_ms = 1500\n\n[scoring]\nmodel = \"v1\""
		)
		.unwrap();

		let base = dir.join("override");
		let settings = load_config_from(base.to_str().unwrap()).unwrap();
		assert_eq!(settings.server.port, 8088);
		assert!(!settings.sources.news.enabled);
		assert_eq!(settings.sources.news.timeout_ms, 1500);
		assert_eq!(settings.sources.news.endpoint, "https://newsapi.org/v2");
		assert_eq!(settings.scoring.model, bh_types::ScoringModel::V1);

		std::fs::remove_dir_all(&dir).ok();
	}

	#[test]
	fn test_invalid_file_is_rejected() {
		let dir = std::env::temp_dir().join(format!("bh-config-invalid-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let file = dir.join("broken.toml");
		std::fs::write(&file, "[sources.wikidata]\ntimeout_ms = 0\n").unwrap();

		let base = dir.join("broken");
		let result = load_config_from(base.to_str().unwrap());
		assert!(matches!(result, Err(ConfigLoadError::Validation(_))));

		std::fs::remove_dir_all(&dir).ok();
	}
}
