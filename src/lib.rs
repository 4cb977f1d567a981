//! Brand Health Aggregator Library
//!
//! Fans a search term out to public data sources, scores each source's
//! evidence and combines the sub-scores into an overall brand health score.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

// Core domain types
pub use bh_types::{
	chrono,
	serde_json,
	Adapter,
	AdapterError,
	AdapterResult,
	AggregateResult,
	PageMetadata,
	QueryTerm,
	QueryTermError,
	Scores,
	ScoringModel,
	SourceAdapter,
	SourceKind,
	SourcePayload,
	SourceResults,
	SourceRuntimeConfig,
	SourceStatus,
	TrendsData,
};

// Service layer
pub use bh_service::{AggregatorService, AggregatorServiceError, AggregatorTrait, Scorer};

// API layer
pub use bh_api::{create_router, with_rate_limit, with_security_headers, AppState};

// Adapters
pub use bh_adapters::{AdapterRegistry, PageScraper};

// Config
pub use bh_config::{
	load_config, log_service_info, log_service_shutdown, log_source_summary,
	log_startup_complete, Settings,
};

pub mod config {
	pub use bh_config::*;
}

pub mod adapters {
	pub use bh_adapters::*;
}

pub mod service {
	pub use bh_service::*;
}

pub mod models {
	pub use bh_types::*;
}

pub mod mocks;

// Re-export external dependencies for custom adapters
pub use async_trait;
pub use reqwest;

/// Builder for the aggregator server
#[derive(Default)]
pub struct BrandHealthBuilder {
	settings: Option<Settings>,
	adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl BrandHealthBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use explicit settings instead of loading the configuration
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Replace the default adapter for the adapter's source
	pub fn with_adapter(mut self, adapter: Arc<dyn SourceAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use bh_config::LogFormat;

		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};
		result.map_err(|e| format!("Failed to initialize tracing: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Build the services and return the router with its state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = match self.settings {
			Some(settings) => settings,
			None => load_config()?,
		};
		settings.validate()?;

		let mut registry = AdapterRegistry::from_settings(&settings)?;
		for adapter in self.adapters {
			registry.register(adapter);
		}

		let aggregator_service = AggregatorService::from_settings(&settings, &registry)?;
		info!(
			"Aggregator ready with {} source(s), {} enabled",
			aggregator_service.sources().len(),
			settings.enabled_sources().len()
		);

		let scrape_client = bh_adapters::build_client(&bh_adapters::ClientConfig::new(
			settings.http.user_agent.clone(),
		))?;
		let page_scraper = PageScraper::new(
			scrape_client,
			settings.http.scrape_timeout_ms,
			settings.http.scrape_max_bytes,
		);

		let router = with_security_headers(
			with_rate_limit(create_router(), &settings.environment.rate_limiting),
			&settings,
		);
		let app_state = AppState {
			aggregator_service: Arc::new(aggregator_service) as Arc<dyn AggregatorTrait>,
			page_scraper: Arc::new(page_scraper),
			settings: Arc::new(settings),
		};

		let router = router.with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Load `.env` and configuration, initialize tracing, then bind and serve
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)?;
		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		log_source_summary(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  POST /aggregate");
		info!("  POST /api/brand-health");
		info!("  POST /api/scrape");
		info!("  POST /api/trends");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
