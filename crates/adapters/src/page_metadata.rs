//! Page metadata scraping and brand-name suggestion
//!
//! Reads `<title>`, the description and Open Graph tags of a page so the
//! caller can pick a term to aggregate.

use bh_types::PageMetadata;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Separators between a brand name and the rest of a page title
const TITLE_SEPARATORS: [&str; 5] = [" | ", " - ", " – ", " — ", ": "];

/// Errors raised while scraping a page
#[derive(Error, Debug)]
pub enum ScrapeError {
	#[error("Invalid URL '{0}': only absolute http(s) URLs can be scraped")]
	InvalidUrl(String),

	#[error("Failed to fetch page: {0}")]
	Fetch(#[from] reqwest::Error),

	#[error("Page returned HTTP {0}")]
	HttpStatus(u16),
}

impl ScrapeError {
	/// Whether the caller supplied a bad URL, as opposed to a fetch failure
	pub fn is_invalid_input(&self) -> bool {
		matches!(self, ScrapeError::InvalidUrl(_))
	}
}

/// Fetches pages and extracts their metadata
#[derive(Debug, Clone)]
pub struct PageScraper {
	client: Client,
	timeout: Duration,
	max_bytes: usize,
}

impl PageScraper {
	pub fn new(client: Client, timeout_ms: u64, max_bytes: usize) -> Self {
		Self {
			client,
			timeout: Duration::from_millis(timeout_ms),
			max_bytes,
		}
	}

	/// Validate that `input` is an absolute http(s) URL
	pub fn parse_url(input: &str) -> Result<Url, ScrapeError> {
		let url = Url::parse(input.trim()).map_err(|_| ScrapeError::InvalidUrl(input.to_string()))?;
		match url.scheme() {
			"http" | "https" if url.host_str().is_some() => Ok(url),
			_ => Err(ScrapeError::InvalidUrl(input.to_string())),
		}
	}

	/// Fetch `url` and extract its metadata
	pub async fn scrape(&self, url: &str) -> Result<PageMetadata, ScrapeError> {
		let url = Self::parse_url(url)?;
		debug!("Scraping page metadata from {}", url);

		let mut response = self
			.client
			.get(url.clone())
			.header(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"))
			.timeout(self.timeout)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(ScrapeError::HttpStatus(status.as_u16()));
		}

		let mut body = Vec::new();
		while let Some(chunk) = response.chunk().await? {
			let remaining = self.max_bytes.saturating_sub(body.len());
			body.extend_from_slice(&chunk[..chunk.len().min(remaining)]);
			if body.len() >= self.max_bytes {
				debug!("Page body truncated at {} bytes", self.max_bytes);
				break;
			}
		}

		let html = String::from_utf8_lossy(&body);
		Ok(extract_metadata(&html, &url))
	}
}

/// Extract metadata from an HTML document served at `url`
pub fn extract_metadata(html: &str, url: &Url) -> PageMetadata {
	let document = Html::parse_document(html);

	let title = Selector::parse("title")
		.ok()
		.and_then(|sel| {
			document
				.select(&sel)
				.next()
				.map(|el| el.text().collect::<String>().trim().to_string())
		})
		.unwrap_or_default();

	let meta_description = meta_content(&document, "meta[name=\"description\"]");
	let og_title = meta_content(&document, "meta[property=\"og:title\"]");
	let og_description = meta_content(&document, "meta[property=\"og:description\"]");
	let og_site_name = meta_content(&document, "meta[property=\"og:site_name\"]");

	let suggested_term = suggest_term(&og_site_name, &title, url.host_str().unwrap_or_default());

	PageMetadata {
		title,
		meta_description,
		og_title,
		og_description,
		og_site_name,
		suggested_term,
	}
}

fn meta_content(document: &Html, selector: &str) -> String {
	Selector::parse(selector)
		.ok()
		.and_then(|sel| {
			document
				.select(&sel)
				.next()
				.and_then(|el| el.value().attr("content"))
				.map(|content| content.trim().to_string())
		})
		.unwrap_or_default()
}

/// Brand name from the site name, the title's first segment, or the host
pub fn suggest_term(og_site_name: &str, title: &str, host: &str) -> String {
	let site_name = og_site_name.trim();
	if !site_name.is_empty() {
		return site_name.to_string();
	}

	let first_segment = TITLE_SEPARATORS
		.iter()
		.filter_map(|sep| title.find(sep))
		.min()
		.map(|at| &title[..at])
		.unwrap_or(title)
		.trim();
	if !first_segment.is_empty() {
		return first_segment.to_string();
	}

	let host = host.trim_start_matches("www.");
	match host.rfind('.') {
		Some(at) if at > 0 => host[..at].to_string(),
		_ => host.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
	<title> Acme Corp | Rockets and Anvils </title>
	<meta name="description" content="Quality products since 1949.">
	<meta property="og:title" content="Acme Corp">
	<meta property="og:description" content="Rockets, anvils and more">
</head>
<body><h1>Welcome</h1></body>
</html>"#;

	#[test]
	fn test_extracts_tags() {
		let url = Url::parse("https://www.acme.com/").unwrap();
		let metadata = extract_metadata(PAGE, &url);

		assert_eq!(metadata.title, "Acme Corp | Rockets and Anvils");
		assert_eq!(metadata.meta_description, "Quality products since 1949.");
		assert_eq!(metadata.og_title, "Acme Corp");
		assert_eq!(metadata.og_description, "Rockets, anvils and more");
		assert_eq!(metadata.og_site_name, "");
		assert_eq!(metadata.suggested_term, "Acme Corp");
	}

	#[test]
	fn test_missing_tags_are_empty() {
		let url = Url::parse("https://www.acme.com/").unwrap();
		let metadata = extract_metadata("<html><body>hi</body></html>", &url);
		assert_eq!(metadata.title, "");
		assert_eq!(metadata.meta_description, "");
		assert_eq!(metadata.suggested_term, "acme");
	}

	#[test]
	fn test_suggest_term_precedence() {
		assert_eq!(suggest_term("Acme", "Something else", "acme.com"), "Acme");
		assert_eq!(suggest_term("", "Globex - Home", "globex.com"), "Globex");
		assert_eq!(suggest_term("", "Initech: Software — Services", "x.com"), "Initech");
		assert_eq!(suggest_term("", "Umbrella – Research | Labs", "x.com"), "Umbrella");
		assert_eq!(suggest_term("", "", "www.hooli.io"), "hooli");
		assert_eq!(suggest_term("", "  ", "localhost"), "localhost");
	}

	#[test]
	fn test_parse_url_rejects_non_http() {
		assert!(PageScraper::parse_url("https://acme.com").is_ok());
		assert!(PageScraper::parse_url("ftp://acme.com").unwrap_err().is_invalid_input());
		assert!(PageScraper::parse_url("acme.com").is_err());
		assert!(PageScraper::parse_url("").is_err());
	}
}
