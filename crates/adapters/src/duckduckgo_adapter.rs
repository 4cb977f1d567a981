//! DuckDuckGo instant answers

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterResult, InstantAnswer, QueryTerm, RelatedTopic, SourceAdapter, SourceKind,
	SourcePayload, SourceRuntimeConfig,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::{build_url, read_json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswerResponse {
	#[serde(default)]
	heading: String,
	#[serde(default)]
	abstract_text: String,
	#[serde(rename = "AbstractURL", default)]
	abstract_url: String,
	#[serde(default)]
	related_topics: Vec<RawTopic>,
}

/// Either a plain topic or a named group of topics
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTopic {
	text: Option<String>,
	#[serde(rename = "FirstURL")]
	first_url: Option<String>,
	name: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
	if value.is_empty() {
		None
	} else {
		Some(value)
	}
}

impl From<InstantAnswerResponse> for InstantAnswer {
	fn from(response: InstantAnswerResponse) -> Self {
		Self {
			heading: non_empty(response.heading),
			abstract_text: non_empty(response.abstract_text),
			abstract_url: non_empty(response.abstract_url),
			related_topics: response
				.related_topics
				.into_iter()
				.map(|topic| RelatedTopic {
					text: topic.text.or(topic.name),
					first_url: topic.first_url,
				})
				.collect(),
		}
	}
}

/// Web-search aggregator adapter
#[derive(Debug)]
pub struct DuckDuckGoAdapter {
	config: Adapter,
	client: Client,
}

impl DuckDuckGoAdapter {
	pub fn new(client: Client) -> Self {
		let config = Adapter::new(
			"duckduckgo-ia".to_string(),
			"DuckDuckGo Instant Answer".to_string(),
			"1.0.0".to_string(),
		);

		Self { config, client }
	}
}

#[async_trait]
impl SourceAdapter for DuckDuckGoAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::DuckDuckGo
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let mut url = build_url(&config.endpoint, "")?;
		url.query_pairs_mut()
			.append_pair("q", term.cleaned())
			.append_pair("format", "json")
			.append_pair("no_html", "1");
		debug!("Fetching instant answer from {}", url);

		let response = self.client.get(url).send().await?;
		let answer: InstantAnswerResponse = read_json(response).await?;
		let answer = InstantAnswer::from(answer);

		debug!(
			"Instant answer for '{}' has {} related topics",
			term,
			answer.related_topics.len()
		);
		Ok(SourcePayload::DuckDuckGo(answer))
	}
}
