//! Sub-scores, the overall score and the scoring configuration

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::sources::SourceKind;

/// Per-source sub-scores and the overall score, all in [0, 100]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Scores {
	pub search_trend: u32,
	pub wikipedia: u32,
	pub search_results: u32,
	pub news_coverage: u32,
	pub wikidata: u32,
	pub google_presence: u32,
	pub overall: u32,
}

impl Scores {
	/// Sub-score belonging to a source
	pub fn for_source(&self, kind: SourceKind) -> u32 {
		match kind {
			SourceKind::Trends => self.search_trend,
			SourceKind::Wikipedia => self.wikipedia,
			SourceKind::DuckDuckGo => self.search_results,
			SourceKind::News => self.news_coverage,
			SourceKind::Wikidata => self.wikidata,
			SourceKind::Google => self.google_presence,
		}
	}

	/// Set the sub-score belonging to a source
	pub fn set_source(&mut self, kind: SourceKind, value: u32) {
		let slot = match kind {
			SourceKind::Trends => &mut self.search_trend,
			SourceKind::Wikipedia => &mut self.wikipedia,
			SourceKind::DuckDuckGo => &mut self.search_results,
			SourceKind::News => &mut self.news_coverage,
			SourceKind::Wikidata => &mut self.wikidata,
			SourceKind::Google => &mut self.google_presence,
		};
		*slot = value;
	}
}

/// Versioned set of sources contributing to the overall score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ScoringModel {
	/// Five sources; commercial search is reported but not averaged
	V1,
	/// All six sources
	#[default]
	V2,
}

impl ScoringModel {
	/// Sources whose sub-scores enter the overall mean
	pub fn contributing_sources(&self) -> &'static [SourceKind] {
		match self {
			ScoringModel::V1 => &SourceKind::ALL[..5],
			ScoringModel::V2 => &SourceKind::ALL,
		}
	}

	pub fn contributes(&self, kind: SourceKind) -> bool {
		self.contributing_sources().contains(&kind)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			ScoringModel::V1 => "v1",
			ScoringModel::V2 => "v2",
		}
	}
}

/// Heuristic constants of the scoring formula
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConstants {
	/// Extract characters per encyclopedia point
	pub wikipedia_chars_per_point: f64,
	/// Points per related topic
	pub related_topic_points: f64,
	/// Points per news article
	pub news_article_points: f64,
	/// Points awarded when a knowledge-graph entity exists
	pub wikidata_presence_points: f64,
	/// Upper bound of every sub-score
	pub max_sub_score: f64,
}

impl Default for ScoringConstants {
	fn default() -> Self {
		Self {
			wikipedia_chars_per_point: 100.0,
			related_topic_points: 10.0,
			news_article_points: 10.0,
			wikidata_presence_points: 80.0,
			max_sub_score: 100.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_model_contributing_sets() {
		assert_eq!(ScoringModel::V1.contributing_sources().len(), 5);
		assert!(!ScoringModel::V1.contributes(SourceKind::Google));
		assert_eq!(ScoringModel::V2.contributing_sources().len(), 6);
		assert!(ScoringModel::V2.contributes(SourceKind::Google));
		assert_eq!(ScoringModel::default(), ScoringModel::V2);
	}

	#[test]
	fn test_scores_serialize_with_public_names() {
		let scores = Scores {
			search_trend: 1,
			wikipedia: 2,
			search_results: 3,
			news_coverage: 4,
			wikidata: 5,
			google_presence: 6,
			overall: 7,
		};
		let json = serde_json::to_value(scores).unwrap();
		assert_eq!(json["searchTrend"], 1);
		assert_eq!(json["searchResults"], 3);
		assert_eq!(json["newsCoverage"], 4);
		assert_eq!(json["googlePresence"], 6);
		assert_eq!(json["overall"], 7);
	}

	#[test]
	fn test_set_and_get_by_source() {
		let mut scores = Scores::default();
		for (i, kind) in SourceKind::ALL.into_iter().enumerate() {
			scores.set_source(kind, i as u32 * 10);
		}
		for (i, kind) in SourceKind::ALL.into_iter().enumerate() {
			assert_eq!(scores.for_source(kind), i as u32 * 10);
		}
	}
}
