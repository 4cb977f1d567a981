//! Commercial search presence via the Google Custom Search JSON API
//!
//! Results are scored here rather than in the scorer: exact matches,
//! authoritative hosts and an official-looking host all add points.

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterError, AdapterResult, QueryTerm, SearchItem, SearchPresence, SecretString,
	SourceAdapter, SourceKind, SourcePayload, SourceRuntimeConfig,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::http::{parse_endpoint, read_json, redacted};

const EXACT_MATCH_POINTS: u32 = 10;
const AUTHORITY_POINTS: u32 = 10;
const OFFICIAL_SITE_POINTS: u32 = 20;
const POPULARITY_POINTS: u32 = 20;
const POPULARITY_THRESHOLD: u64 = 1000;
const MAX_SCORE: u32 = 100;

const AUTHORITY_TLDS: [&str; 3] = ["gov", "edu", "org"];
const AUTHORITY_DOMAINS: [&str; 4] = [
	"wikipedia.org",
	"linkedin.com",
	"bloomberg.com",
	"reuters.com",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomSearchResponse {
	search_information: Option<SearchInformation>,
	#[serde(default)]
	items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInformation {
	/// Reported as a decimal string
	total_results: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
	#[serde(default)]
	title: String,
	#[serde(default)]
	link: String,
	snippet: Option<String>,
	display_link: Option<String>,
}

impl From<RawItem> for SearchItem {
	fn from(item: RawItem) -> Self {
		Self {
			title: item.title,
			link: item.link,
			snippet: item.snippet,
			display_link: item.display_link,
		}
	}
}

/// Query shaping for the custom search engine
#[derive(Debug, Clone, Default)]
pub struct SearchQueryOptions {
	pub search_engine_id: Option<SecretString>,
	pub keywords: Vec<String>,
	pub excluded_sites: Vec<String>,
	pub page_size: Option<u32>,
}

/// Commercial search adapter
#[derive(Debug)]
pub struct GoogleSearchAdapter {
	config: Adapter,
	client: Client,
	options: SearchQueryOptions,
}

impl GoogleSearchAdapter {
	pub fn new(client: Client, options: SearchQueryOptions) -> Self {
		let config = Adapter::new(
			"google-cse".to_string(),
			"Google Custom Search".to_string(),
			"1.0.0".to_string(),
		)
		.with_description("Top-10 web results scored for brand presence");

		Self {
			config,
			client,
			options,
		}
	}

	/// Search query: the term plus configured keywords and `-site:` exclusions
	fn query(&self, term: &QueryTerm) -> String {
		let mut parts = vec![term.cleaned().to_string()];
		parts.extend(
			self.options
				.keywords
				.iter()
				.filter(|k| !k.trim().is_empty())
				.map(|k| k.trim().to_string()),
		);
		parts.extend(
			self.options
				.excluded_sites
				.iter()
				.filter(|s| !s.trim().is_empty())
				.map(|s| format!("-site:{}", s.trim())),
		);
		parts.join(" ")
	}

	fn request_url(
		&self,
		term: &QueryTerm,
		endpoint: &str,
		api_key: &SecretString,
	) -> AdapterResult<Url> {
		let engine_id = self
			.options
			.search_engine_id
			.as_ref()
			.filter(|id| !id.is_empty())
			.ok_or_else(|| AdapterError::MissingCredential {
				kind: SourceKind::Google,
				credential: "search_engine_id".to_string(),
			})?;

		let mut url = parse_endpoint(endpoint)?;
		url.query_pairs_mut()
			.append_pair("q", &self.query(term))
			.append_pair("key", api_key.expose_secret())
			.append_pair("cx", engine_id.expose_secret())
			.append_pair("num", &self.options.page_size.unwrap_or(10).to_string());
		Ok(url)
	}

	async fn search(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SearchPresence> {
		let api_key = config.require_api_key()?;
		let url = self.request_url(term, &config.endpoint, api_key)?;
		debug!("Searching {}", redacted(&url));

		let response = self.client.get(url).send().await?;
		let body: CustomSearchResponse = read_json(response).await?;

		let total_results = body
			.search_information
			.and_then(|info| info.total_results)
			.and_then(|total| total.trim().parse::<u64>().ok())
			.unwrap_or(0);
		let items: Vec<SearchItem> = body.items.into_iter().map(SearchItem::from).collect();

		Ok(score_results(term.cleaned(), items, total_results))
	}
}

fn item_host(item: &SearchItem) -> Option<String> {
	Url::parse(&item.link)
		.ok()
		.and_then(|url| url.host_str().map(str::to_lowercase))
		.or_else(|| item.display_link.as_ref().map(|d| d.to_lowercase()))
}

fn is_authority_host(host: &str) -> bool {
	let tld_match = host
		.rsplit('.')
		.next()
		.map(|tld| AUTHORITY_TLDS.contains(&tld))
		.unwrap_or(false);

	tld_match
		|| AUTHORITY_DOMAINS
			.iter()
			.any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Score search results for a cleaned term
pub fn score_results(term: &str, items: Vec<SearchItem>, total_results: u64) -> SearchPresence {
	let needle = term.to_lowercase();
	let compact: String = needle.chars().filter(|c| !c.is_whitespace()).collect();

	let mut exact_matches = 0;
	let mut authority_score = 0;

	for item in &items {
		let in_title = item.title.to_lowercase().contains(&needle);
		let in_snippet = item
			.snippet
			.as_ref()
			.map(|s| s.to_lowercase().contains(&needle))
			.unwrap_or(false);
		if in_title || in_snippet {
			exact_matches += 1;
		}

		if let Some(host) = item_host(item) {
			if is_authority_host(&host) {
				authority_score += AUTHORITY_POINTS;
			}
			if !compact.is_empty() && host.contains(&compact) {
				authority_score += OFFICIAL_SITE_POINTS;
			}
		}
	}

	let popularity = if total_results > POPULARITY_THRESHOLD {
		POPULARITY_POINTS
	} else {
		0
	};
	let score = (exact_matches * EXACT_MATCH_POINTS + authority_score + popularity).min(MAX_SCORE);

	SearchPresence {
		score,
		total_results,
		exact_matches,
		authority_score,
		items,
	}
}

#[async_trait]
impl SourceAdapter for GoogleSearchAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::Google
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let presence = match self.search(term, config).await {
			Ok(presence) => {
				debug!(
					"Search presence for '{}': score {} ({} exact, {} authority)",
					term, presence.score, presence.exact_matches, presence.authority_score
				);
				presence
			},
			Err(e) => {
				warn!("Search presence for '{}' unavailable: {}", term, e);
				SearchPresence::default()
			},
		};

		Ok(SourcePayload::Google(presence))
	}
}
