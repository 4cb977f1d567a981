//! External data sources and their normalized payloads

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub mod encyclopedia;
pub mod instant_answer;
pub mod knowledge_graph;
pub mod news;
pub mod search_presence;
pub mod trends;

pub use encyclopedia::WikiSummary;
pub use instant_answer::{InstantAnswer, RelatedTopic};
pub use knowledge_graph::WikidataEntity;
pub use news::{NewsArticle, NewsData};
pub use search_presence::{SearchItem, SearchPresence};
pub use trends::{TrendPoint, TrendsData, FLAT_SERIES_WEEKS};

/// The six data sources a brand is assessed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	/// Search-interest time series
	Trends,
	/// Encyclopedia page summary
	Wikipedia,
	/// Web-search aggregator instant answer
	DuckDuckGo,
	/// News search
	News,
	/// Knowledge-graph entity lookup
	Wikidata,
	/// Commercial search engine results
	Google,
}

impl SourceKind {
	/// Every source, in the order results are reported
	pub const ALL: [SourceKind; 6] = [
		SourceKind::Trends,
		SourceKind::Wikipedia,
		SourceKind::DuckDuckGo,
		SourceKind::News,
		SourceKind::Wikidata,
		SourceKind::Google,
	];

	/// Configuration key and serialized name
	pub fn as_str(&self) -> &'static str {
		match self {
			SourceKind::Trends => "trends",
			SourceKind::Wikipedia => "wikipedia",
			SourceKind::DuckDuckGo => "duckduckgo",
			SourceKind::News => "news",
			SourceKind::Wikidata => "wikidata",
			SourceKind::Google => "google",
		}
	}

	/// Human readable label used in diagnostics
	pub fn label(&self) -> &'static str {
		match self {
			SourceKind::Trends => "Google Trends",
			SourceKind::Wikipedia => "Wikipedia",
			SourceKind::DuckDuckGo => "DuckDuckGo",
			SourceKind::News => "News API",
			SourceKind::Wikidata => "Wikidata",
			SourceKind::Google => "Google Search",
		}
	}
}

impl fmt::Display for SourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SourceKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SourceKind::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("Unknown source: {}", s))
	}
}

/// Payload produced by a successful adapter call
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePayload {
	Trends(TrendsData),
	Wikipedia(WikiSummary),
	DuckDuckGo(InstantAnswer),
	News(NewsData),
	Wikidata(WikidataEntity),
	Google(SearchPresence),
}

impl SourcePayload {
	/// Source the payload belongs to
	pub fn kind(&self) -> SourceKind {
		match self {
			SourcePayload::Trends(_) => SourceKind::Trends,
			SourcePayload::Wikipedia(_) => SourceKind::Wikipedia,
			SourcePayload::DuckDuckGo(_) => SourceKind::DuckDuckGo,
			SourcePayload::News(_) => SourceKind::News,
			SourcePayload::Wikidata(_) => SourceKind::Wikidata,
			SourcePayload::Google(_) => SourceKind::Google,
		}
	}
}

/// Collected results of one aggregation, `None` meaning unavailable
///
/// Field names follow the public response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SourceResults {
	pub trends: Option<TrendsData>,
	pub wiki: Option<WikiSummary>,
	pub ddg: Option<InstantAnswer>,
	pub news: Option<NewsData>,
	pub wikidata: Option<WikidataEntity>,
	pub google: Option<SearchPresence>,
}

impl SourceResults {
	/// Store a payload in the slot for its source, replacing any previous value
	pub fn insert(&mut self, payload: SourcePayload) {
		match payload {
			SourcePayload::Trends(data) => self.trends = Some(data),
			SourcePayload::Wikipedia(data) => self.wiki = Some(data),
			SourcePayload::DuckDuckGo(data) => self.ddg = Some(data),
			SourcePayload::News(data) => self.news = Some(data),
			SourcePayload::Wikidata(data) => self.wikidata = Some(data),
			SourcePayload::Google(data) => self.google = Some(data),
		}
	}

	/// Whether the given source produced a payload
	pub fn is_available(&self, kind: SourceKind) -> bool {
		match kind {
			SourceKind::Trends => self.trends.is_some(),
			SourceKind::Wikipedia => self.wiki.is_some(),
			SourceKind::DuckDuckGo => self.ddg.is_some(),
			SourceKind::News => self.news.is_some(),
			SourceKind::Wikidata => self.wikidata.is_some(),
			SourceKind::Google => self.google.is_some(),
		}
	}
}

impl FromIterator<SourcePayload> for SourceResults {
	fn from_iter<I: IntoIterator<Item = SourcePayload>>(iter: I) -> Self {
		let mut results = SourceResults::default();
		for payload in iter {
			results.insert(payload);
		}
		results
	}
}
