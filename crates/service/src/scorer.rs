//! Sub-score and overall score computation
//!
//! Pure functions of the collected results. Completion order of the sources
//! has no influence on the outcome.

use bh_types::{Scores, ScoringConstants, ScoringModel, SourceKind, SourceResults};

/// Scores collected source results under a scoring model
#[derive(Debug, Clone)]
pub struct Scorer {
	model: ScoringModel,
	constants: ScoringConstants,
	weights: [f64; 6],
}

impl Default for Scorer {
	fn default() -> Self {
		Self::new(ScoringModel::default(), ScoringConstants::default())
	}
}

fn slot(kind: SourceKind) -> usize {
	match kind {
		SourceKind::Trends => 0,
		SourceKind::Wikipedia => 1,
		SourceKind::DuckDuckGo => 2,
		SourceKind::News => 3,
		SourceKind::Wikidata => 4,
		SourceKind::Google => 5,
	}
}

impl Scorer {
	/// Scorer with every weight set to 1
	pub fn new(model: ScoringModel, constants: ScoringConstants) -> Self {
		Self {
			model,
			constants,
			weights: [1.0; 6],
		}
	}

	/// Override a source's weight in the overall mean; invalid weights count as 0
	pub fn with_weight(mut self, kind: SourceKind, weight: f64) -> Self {
		self.weights[slot(kind)] = if weight.is_finite() && weight > 0.0 {
			weight
		} else {
			0.0
		};
		self
	}

	pub fn model(&self) -> ScoringModel {
		self.model
	}

	pub fn weight(&self, kind: SourceKind) -> f64 {
		self.weights[slot(kind)]
	}

	/// Rounded sub-score of one source, 0 when unavailable
	pub fn sub_score(&self, kind: SourceKind, results: &SourceResults) -> u32 {
		let c = &self.constants;
		let raw = match kind {
			SourceKind::Trends => results
				.trends
				.as_ref()
				.and_then(|data| data.mean_value())
				.unwrap_or(0.0),
			SourceKind::Wikipedia => results
				.wiki
				.as_ref()
				.map(|wiki| wiki.extract_chars() as f64 / c.wikipedia_chars_per_point)
				.unwrap_or(0.0),
			SourceKind::DuckDuckGo => results
				.ddg
				.as_ref()
				.map(|ddg| ddg.related_topics.len() as f64 * c.related_topic_points)
				.unwrap_or(0.0),
			SourceKind::News => results
				.news
				.as_ref()
				.map(|news| news.articles.len() as f64 * c.news_article_points)
				.unwrap_or(0.0),
			SourceKind::Wikidata => results
				.wikidata
				.as_ref()
				.map(|_| c.wikidata_presence_points)
				.unwrap_or(0.0),
			SourceKind::Google => results
				.google
				.as_ref()
				.map(|google| f64::from(google.score))
				.unwrap_or(0.0),
		};

		self.bounded(raw)
	}

	/// Round and clamp to [0, max]; NaN becomes 0
	fn bounded(&self, value: f64) -> u32 {
		if !value.is_finite() {
			return 0;
		}
		value.clamp(0.0, self.constants.max_sub_score).round() as u32
	}

	/// Score every source and the overall weighted mean
	pub fn score(&self, results: &SourceResults) -> Scores {
		let mut scores = Scores::default();
		for kind in SourceKind::ALL {
			scores.set_source(kind, self.sub_score(kind, results));
		}

		let (weighted, total_weight) = self
			.model
			.contributing_sources()
			.iter()
			.fold((0.0, 0.0), |(sum, weights), kind| {
				let weight = self.weight(*kind);
				(
					sum + weight * f64::from(scores.for_source(*kind)),
					weights + weight,
				)
			});

		scores.overall = if total_weight > 0.0 {
			self.bounded(weighted / total_weight)
		} else {
			0
		};
		scores
	}
}
