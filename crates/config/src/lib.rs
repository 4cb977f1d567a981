//! Brand Health Configuration
//!
//! Configuration management and startup utilities for the brand health aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ConfigValidationError, EnvironmentProfile, EnvironmentSettings, HttpSettings, LogFormat,
	LoggingSettings, QueryOptions, RateLimitSettings, ScoringSettings, SecurityHeadersSettings,
	ServerSettings, Settings, SourceSettings, SourcesSettings,
};
pub use startup_logger::{
	log_service_info, log_service_shutdown, log_source_summary, log_startup_complete,
};
