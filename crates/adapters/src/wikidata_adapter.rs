//! Knowledge-graph entity lookup through Wikidata's `wbsearchentities`

use async_trait::async_trait;
use bh_types::{
	Adapter, AdapterError, AdapterResult, QueryTerm, SourceAdapter, SourceKind, SourcePayload,
	SourceRuntimeConfig, WikidataEntity,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::http::{parse_endpoint, read_json};

#[derive(Debug, Deserialize)]
struct SearchEntitiesResponse {
	#[serde(default)]
	search: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
	id: String,
	label: Option<String>,
	description: Option<String>,
	concepturi: Option<String>,
	#[serde(default)]
	aliases: Vec<String>,
}

impl From<RawEntity> for WikidataEntity {
	fn from(entity: RawEntity) -> Self {
		Self {
			id: entity.id,
			label: entity.label,
			description: entity.description,
			concept_uri: entity.concepturi,
			aliases: entity.aliases,
		}
	}
}

/// Knowledge-graph adapter
#[derive(Debug)]
pub struct WikidataAdapter {
	config: Adapter,
	client: Client,
	language: String,
}

impl WikidataAdapter {
	pub fn new(client: Client) -> Self {
		let config = Adapter::new(
			"wikidata-search".to_string(),
			"Wikidata".to_string(),
			"1.0.0".to_string(),
		);

		Self {
			config,
			client,
			language: "en".to_string(),
		}
	}

	pub fn with_language(mut self, language: Option<String>) -> Self {
		if let Some(language) = language.filter(|l| !l.is_empty()) {
			self.language = language;
		}
		self
	}
}

/// First entity of the search, `NoData` when nothing matched
fn first_entity(response: SearchEntitiesResponse) -> AdapterResult<WikidataEntity> {
	response
		.search
		.into_iter()
		.next()
		.map(WikidataEntity::from)
		.ok_or(AdapterError::NoData {
			kind: SourceKind::Wikidata,
		})
}

#[async_trait]
impl SourceAdapter for WikidataAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn kind(&self) -> SourceKind {
		SourceKind::Wikidata
	}

	async fn fetch(
		&self,
		term: &QueryTerm,
		config: &SourceRuntimeConfig,
	) -> AdapterResult<SourcePayload> {
		let mut url = parse_endpoint(&config.endpoint)?;
		url.query_pairs_mut()
			.append_pair("action", "wbsearchentities")
			.append_pair("search", term.cleaned())
			.append_pair("language", &self.language)
			.append_pair("format", "json");
		debug!("Searching knowledge graph at {}", url);

		let response = self.client.get(url).send().await?;
		let body: SearchEntitiesResponse = read_json(response).await?;
		let entity = first_entity(body)?;

		debug!("Knowledge graph matched '{}' to {}", term, entity.id);
		Ok(SourcePayload::Wikidata(entity))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_entity_is_taken() {
		let body = r#"{
			"searchinfo": {"search": "acme"},
			"search": [
				{"id": "Q189360", "label": "Acme Corporation", "description": "fictional corporation",
				 "concepturi": "http://www.wikidata.org/entity/Q189360", "aliases": ["ACME"]},
				{"id": "Q2", "label": "Earth"}
			],
			"success": 1
		}"#;
		let entity = first_entity(serde_json::from_str(body).unwrap()).unwrap();
		assert_eq!(entity.id, "Q189360");
		assert_eq!(
			entity.concept_uri.as_deref(),
			Some("http://www.wikidata.org/entity/Q189360")
		);
		assert_eq!(entity.aliases, vec!["ACME".to_string()]);
	}

	#[test]
	fn test_empty_search_is_no_data() {
		let body = r#"{"searchinfo": {"search": "zzzz"}, "search": [], "success": 1}"#;
		let result = first_entity(serde_json::from_str(body).unwrap());
		assert!(result.unwrap_err().is_no_data());
	}
}
