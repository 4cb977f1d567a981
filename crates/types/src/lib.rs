//! Brand Health Types
//!
//! Shared domain models and traits for the brand health aggregator:
//! source payloads, scores, the query term and the adapter contract.

pub mod adapters;
pub mod aggregate;
pub mod models;
pub mod page;
pub mod scores;
pub mod sources;
pub mod term;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{
	Adapter, AdapterError, AdapterResult, RetryPolicy, SourceAdapter, SourceRuntimeConfig,
	DEFAULT_SOURCE_TIMEOUT_MS,
};
pub use aggregate::{
	AggregateData, AggregateResult, AggregationMetadata, SourceReport, SourceStatus,
};
pub use models::SecretString;
pub use page::PageMetadata;
pub use scores::{Scores, ScoringConstants, ScoringModel};
pub use sources::{
	InstantAnswer, NewsArticle, NewsData, RelatedTopic, SearchItem, SearchPresence, SourceKind,
	SourcePayload, SourceResults, TrendPoint, TrendsData, WikiSummary, WikidataEntity,
	FLAT_SERIES_WEEKS,
};
pub use term::{QueryTerm, QueryTermError, MAX_TERM_LENGTH};
