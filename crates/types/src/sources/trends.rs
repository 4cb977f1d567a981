//! Search interest time series

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Number of weekly points in a synthesized flat series (one year)
pub const FLAT_SERIES_WEEKS: usize = 52;

/// A single point of search interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
	/// Unix timestamp (seconds) as reported by the provider
	pub time: String,
	/// Human readable date label
	pub formatted_time: String,
	/// Relative interest, 0-100
	pub value: f64,
}

/// Normalized trend-series payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrendsData {
	pub timeline_data: Vec<TrendPoint>,
	/// Failure description when the provider could not be read
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// True when the series was synthesized after rate limiting
	#[serde(default)]
	pub synthetic: bool,
}

impl TrendsData {
	pub fn new(timeline_data: Vec<TrendPoint>) -> Self {
		Self {
			timeline_data,
			error: None,
			synthetic: false,
		}
	}

	/// Empty timeline carrying the failure reason
	pub fn failed(reason: impl Into<String>) -> Self {
		Self {
			timeline_data: Vec::new(),
			error: Some(format!("Failed to fetch trends data: {}", reason.into())),
			synthetic: false,
		}
	}

	/// Zero-valued weekly series ending at `end`
	pub fn flat(weeks: usize, end: DateTime<Utc>) -> Self {
		let timeline_data = (0..weeks)
			.rev()
			.map(|offset| {
				let at = end - Duration::weeks(offset as i64);
				TrendPoint {
					time: at.timestamp().to_string(),
					formatted_time: at.format("%b %-d, %Y").to_string(),
					value: 0.0,
				}
			})
			.collect();

		Self {
			timeline_data,
			error: None,
			synthetic: true,
		}
	}

	/// Mean of all point values, `None` when there are no points
	pub fn mean_value(&self) -> Option<f64> {
		if self.timeline_data.is_empty() {
			return None;
		}
		let total: f64 = self.timeline_data.iter().map(|p| p.value).sum();
		Some(total / self.timeline_data.len() as f64)
	}

	/// Whether any point carries non-zero interest
	pub fn has_data(&self) -> bool {
		self.timeline_data.iter().any(|p| p.value > 0.0)
	}
}
