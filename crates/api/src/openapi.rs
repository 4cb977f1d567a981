use utoipa::OpenApi;

use crate::handlers::aggregate::AggregateRequest;
use crate::handlers::common::ErrorResponse;
use crate::handlers::health::ReadinessResponse;
use crate::handlers::scrape::{ScrapeRequest, ScrapeResponse};
use crate::handlers::trends::TrendsRequest;
use crate::handlers::{aggregate, health, scrape, trends};

use bh_types::{
	AggregateData, AggregateResult, AggregationMetadata, PageMetadata, Scores, SourceReport,
	SourceStatus, TrendsData,
};

#[derive(OpenApi)]
#[openapi(
	paths(
		health::health,
		health::ready,
		aggregate::post_aggregate,
		scrape::post_scrape,
		trends::post_trends,
	),
	components(schemas(
		AggregateRequest, AggregateResult, AggregateData, AggregationMetadata,
		SourceReport, SourceStatus, Scores,
		ScrapeRequest, ScrapeResponse, PageMetadata,
		TrendsRequest, TrendsData,
		ReadinessResponse, ErrorResponse
	)),
	tags(
		(name = "aggregate", description = "Brand health scoring"),
		(name = "sources", description = "Single-source lookups and page scraping"),
		(name = "health", description = "Health and readiness endpoints")
	)
)]
pub struct ApiDoc;
