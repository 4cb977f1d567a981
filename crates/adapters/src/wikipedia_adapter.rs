//! Encyclopedia page summaries from the Wikipedia REST API

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterError, AdapterResult, QueryTerm, SourceAdapter, SourceKind, SourcePayload,
	SourceRuntimeConfig, WikiSummary,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::http::{build_url, read_json};

#[derive(Debug, Deserialize)]
struct SummaryResponse {
	title: Option<String>,
	description: Option<String>,
	extract: Option<String>,
	content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
	desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
	page: Option<String>,
}

impl From<SummaryResponse> for WikiSummary {
	fn from(response: SummaryResponse) -> Self {
		Self {
			title: response.title,
			description: response.description,
			extract: response.extract,
			page_url: response
				.content_urls
				.and_then(|urls| urls.desktop)
				.and_then(|desktop| desktop.page),
		}
	}
}

/// Encyclopedia adapter
#[derive(Debug)]
pub struct WikipediaAdapter {
	config: Adapter,
	client: Client,
	/// Tried first as `{term}_{suffix}`; `None` goes straight to the bare term
	disambiguation_suffix: Option<String>,
}

impl WikipediaAdapter {
	pub fn new(client: Client) -> Self {
		let config = Adapter::new(
			"wikipedia-rest".to_string(),
			"Wikipedia REST".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Page summary with company disambiguation");

		Self {
			config,
			client,
			disambiguation_suffix: Some("(company)".to_string()),
		}
	}

	pub fn with_disambiguation_suffix(mut self, suffix: Option<String>) -> Self {
		self.disambiguation_suffix = suffix.filter(|s| !s.trim().is_empty());
		self
	}

	/// Page titles to try, most specific first
	fn candidate_titles(&self, term: &QueryTerm) -> Vec<String> {
		let mut titles = Vec::with_capacity(2);
		if let Some(suffix) = &self.disambiguation_suffix {
			titles.push(format!("{}_{}", term.cleaned(), suffix.trim()));
		}
		titles.push(term.cleaned().to_string());
		titles
	}

	fn summary_url(endpoint: &str, title: &str) -> AdapterResult<Url> {
		let mut url = build_url(endpoint, "page/summary")?;
		url.path_segments_mut()
			.map_err(|_| AdapterError::ConfigError {
				reason: format!("Endpoint '{}' cannot carry a path", endpoint),
			})?
			.push(title);
		Ok(url)
	}
}

#[async_trait]
impl SourceAdapter for WikipediaAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::Wikipedia
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let titles = self.candidate_titles(term);
		let mut last_error = AdapterError::NoData {
			kind: SourceKind::Wikipedia,
		};

		for title in titles {
			let url = Self::summary_url(&config.endpoint, &title)?;
			debug!("Fetching encyclopedia summary from {}", url);

			let response = self.client.get(url).send().await?;
			match read_json::<SummaryResponse>(response).await {
				Ok(summary) => return Ok(SourcePayload::Wikipedia(summary.into())),
				// Fall back to the next title only on a status failure
				Err(e @ AdapterError::HttpStatusError { .. }) => {
					debug!("No encyclopedia page '{}': {}", title, e);
					last_error = e;
				},
				Err(e) => return Err(e),
			}
		}

		Err(last_error)
	}
}
