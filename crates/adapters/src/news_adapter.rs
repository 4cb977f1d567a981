//! News coverage from NewsAPI's `everything` endpoint

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterResult, NewsArticle, NewsData, QueryTerm, SourceAdapter, SourceKind,
	SourcePayload, SourceRuntimeConfig,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::{build_url, read_json};

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
	#[serde(default)]
	total_results: u64,
	#[serde(default)]
	articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
	title: Option<String>,
	description: Option<String>,
	url: Option<String>,
	published_at: Option<String>,
	source: Option<RawPublisher>,
}

#[derive(Debug, Deserialize)]
struct RawPublisher {
	name: Option<String>,
}

impl From<RawArticle> for NewsArticle {
	fn from(article: RawArticle) -> Self {
		Self {
			title: article.title.unwrap_or_default(),
			description: article.description,
			url: article.url.unwrap_or_default(),
			published_at: article.published_at,
			source: article.source.and_then(|s| s.name),
		}
	}
}

/// News search adapter
#[derive(Debug)]
pub struct NewsAdapter {
	config: Adapter,
	client: Client,
	language: String,
	page_size: u32,
}

impl NewsAdapter {
	pub fn new(client: Client) -> Self {
		let config = Adapter::new(
			"newsapi-everything".to_string(),
			"NewsAPI".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Exact-phrase news search sorted by relevancy");

		Self {
			config,
			client,
			language: DEFAULT_LANGUAGE.to_string(),
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	pub fn with_language(mut self, language: Option<String>) -> Self {
		if let Some(language) = language.filter(|l| !l.is_empty()) {
			self.language = language;
		}
		self
	}

	pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
		if let Some(page_size) = page_size.filter(|size| *size > 0) {
			self.page_size = page_size;
		}
		self
	}
}

/// Exact-phrase query
fn quoted(term: &QueryTerm) -> String {
	format!("\"{}\"", term.cleaned())
}

#[async_trait]
impl SourceAdapter for NewsAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::News
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let api_key = config.require_api_key()?;

		let mut url = build_url(&config.endpoint, "everything")?;
		url.query_pairs_mut()
			.append_pair("q", &quoted(term))
			.append_pair("language", &self.language)
			.append_pair("sortBy", "relevancy")
			.append_pair("pageSize", &self.page_size.to_string());
		debug!("Fetching news from {}", url);

		let response = self
			.client
			.get(url)
			.header("X-Api-Key", api_key.expose_secret())
			.send()
			.await?;
		let body: EverythingResponse = read_json(response).await?;

		let data = NewsData {
			total_results: body.total_results,
			articles: body.articles.into_iter().map(NewsArticle::from).collect(),
		};
		debug!(
			"News search for '{}' returned {} articles ({} total)",
			term,
			data.articles.len(),
			data.total_results
		);
		Ok(SourcePayload::News(data))
	}
}
