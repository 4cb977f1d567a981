//! In-process stand-in for the public data providers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
	extract::{Path, Query, State},
	http::{HeaderMap, StatusCode},
	response::{Html, IntoResponse, Response},
	routing::get,
	Json, Router,
};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

/// How the fake trend provider answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum TrendsMode {
	/// Two weekly points, 40 and 60
	Series,
	/// All-zero series
	Zeros,
	/// HTTP 429 on every call
	RateLimited,
	/// HTTP 429 after a 200ms stall
	SlowRateLimited,
	/// HTML page instead of JSON
	Html,
	/// HTTP 500
	ServerError,
}

#[derive(Debug)]
pub struct UpstreamState {
	pub trends_mode: Mutex<TrendsMode>,
	pub trends_calls: AtomicUsize,
	pub wiki_titles: Mutex<Vec<String>>,
	pub news_api_keys: Mutex<Vec<String>>,
	pub google_queries: Mutex<Vec<String>>,
}

impl UpstreamState {
	fn new() -> Self {
		Self {
			trends_mode: Mutex::new(TrendsMode::Series),
			trends_calls: AtomicUsize::new(0),
			wiki_titles: Mutex::new(Vec::new()),
			news_api_keys: Mutex::new(Vec::new()),
			google_queries: Mutex::new(Vec::new()),
		}
	}
}

pub struct FakeUpstream {
	pub base_url: String,
	pub state: Arc<UpstreamState>,
	handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl FakeUpstream {
	pub async fn spawn() -> Self {
		let state = Arc::new(UpstreamState::new());
		let app = Router::new()
			.route("/trends/search.json", get(trends))
			.route("/wiki/page/summary/{title}", get(wiki_summary))
			.route("/ddg/", get(instant_answer))
			.route("/news/everything", get(news))
			.route("/wikidata", get(wikidata))
			.route("/google", get(google))
			.route("/site", get(site))
			.route("/bare", get(bare_site))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
			.await
			.expect("bind upstream port");
		let addr = listener.local_addr().unwrap();
		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Self {
			base_url: format!("http://{}", addr),
			state,
			handle,
		}
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}

	pub fn set_trends_mode(&self, mode: TrendsMode) {
		*self.state.trends_mode.lock().unwrap() = mode;
	}

	pub fn trends_calls(&self) -> usize {
		self.state.trends_calls.load(Ordering::SeqCst)
	}

	pub fn wiki_titles(&self) -> Vec<String> {
		self.state.wiki_titles.lock().unwrap().clone()
	}

	pub fn news_api_keys(&self) -> Vec<String> {
		self.state.news_api_keys.lock().unwrap().clone()
	}

	pub fn google_queries(&self) -> Vec<String> {
		self.state.google_queries.lock().unwrap().clone()
	}
}

impl Drop for FakeUpstream {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

fn trend_point(date: &str, timestamp: &str, value: u32) -> Value {
	json!({
		"date": date,
		"timestamp": timestamp,
		"values": [{ "query": "acme", "value": value.to_string(), "extracted_value": value }]
	})
}

async fn trends(State(state): State<Arc<UpstreamState>>) -> Response {
	state.trends_calls.fetch_add(1, Ordering::SeqCst);
	let mode = *state.trends_mode.lock().unwrap();
	match mode {
		TrendsMode::Series | TrendsMode::Zeros => {
			let (first, second) = if mode == TrendsMode::Series {
				(40, 60)
			} else {
				(0, 0)
			};
			Json(json!({
				"search_metadata": { "status": "Success" },
				"interest_over_time": {
					"timeline_data": [
						trend_point("Jan 1 – 7, 2024", "1704067200", first),
						trend_point("Jan 8 – 14, 2024", "1704672000", second)
					]
				}
			}))
			.into_response()
		},
		TrendsMode::RateLimited => {
			(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
		},
		TrendsMode::SlowRateLimited => {
			tokio::time::sleep(Duration::from_millis(200)).await;
			(StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response()
		},
		TrendsMode::Html => Html("<html><body>Please slow down</body></html>").into_response(),
		TrendsMode::ServerError => {
			(StatusCode::INTERNAL_SERVER_ERROR, "upstream broke").into_response()
		},
	}
}

/// Only bare titles exist, so a disambiguated lookup falls back
async fn wiki_summary(
	State(state): State<Arc<UpstreamState>>,
	Path(title): Path<String>,
) -> Response {
	state.wiki_titles.lock().unwrap().push(title.clone());
	if title.contains("(company)") {
		return (
			StatusCode::NOT_FOUND,
			Json(json!({ "type": "https://mediawiki.org/wiki/HyperSwitch/errors/not_found" })),
		)
			.into_response();
	}

	Json(json!({
		"title": title,
		"description": "Fictional company",
		"extract": "a".repeat(300),
		"content_urls": { "desktop": { "page": format!("https://en.wikipedia.org/wiki/{}", title) } }
	}))
	.into_response()
}

async fn instant_answer() -> Json<Value> {
	Json(json!({
		"Heading": "",
		"AbstractText": "",
		"AbstractURL": "",
		"RelatedTopics": []
	}))
}

async fn news(
	State(state): State<Arc<UpstreamState>>,
	headers: HeaderMap,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	let key = headers
		.get("x-api-key")
		.and_then(|v| v.to_str().ok())
		.unwrap_or_default()
		.to_string();
	state.news_api_keys.lock().unwrap().push(key.clone());
	if key.is_empty() {
		return (
			StatusCode::UNAUTHORIZED,
			Json(json!({ "status": "error", "code": "apiKeyMissing" })),
		)
			.into_response();
	}

	let query = params.get("q").cloned().unwrap_or_default();
	let articles: Vec<Value> = (0..4)
		.map(|i| {
			json!({
				"source": { "id": null, "name": "Example Wire" },
				"title": format!("{} story {}", query, i),
				"description": null,
				"url": format!("https://news.example.com/{}", i),
				"publishedAt": "2024-01-01T00:00:00Z"
			})
		})
		.collect();
	Json(json!({ "status": "ok", "totalResults": 4, "articles": articles })).into_response()
}

/// The term "Nobody" has no entity
async fn wikidata(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
	let search = params.get("search").cloned().unwrap_or_default();
	if search.eq_ignore_ascii_case("nobody") {
		return Json(json!({ "searchinfo": { "search": search }, "search": [] }));
	}
	Json(json!({
		"searchinfo": { "search": search },
		"search": [{
			"id": "Q42",
			"label": search,
			"description": "fictional company",
			"concepturi": "http://www.wikidata.org/entity/Q42",
			"aliases": []
		}]
	}))
}

async fn google(
	State(state): State<Arc<UpstreamState>>,
	Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
	let query = params.get("q").cloned().unwrap_or_default();
	state.google_queries.lock().unwrap().push(query);
	Json(json!({
		"searchInformation": { "totalResults": "250000" },
		"items": [
			{ "title": "Welcome", "link": "https://www.acmecorp.com/", "snippet": "Home page", "displayLink": "www.acmecorp.com" },
			{ "title": "News", "link": "https://news.example.net/a", "snippet": "Acme Corp raises funding" },
			{ "title": "Acme Corp", "link": "https://en.wikipedia.org/wiki/Acme_Corp", "snippet": "" }
		]
	}))
}

async fn site() -> Html<&'static str> {
	Html(
		r#"<!DOCTYPE html>
<html><head>
<title>Acme Corp | Rockets and Anvils</title>
<meta name="description" content="Quality products since 1949.">
<meta property="og:title" content="Acme Corp">
<meta property="og:site_name" content="Acme">
</head><body>hello</body></html>"#,
	)
}

async fn bare_site() -> Html<&'static str> {
	Html("<html><body>no head</body></html>")
}
