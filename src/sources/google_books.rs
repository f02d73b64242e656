//! Google Books volumes API
//!
//! API docs: https://developers.google.com/books/docs/v1/using

use async_trait::async_trait;
use serde::Deserialize;

use super::{absorb, http_client, names, read_json, BibliographicSource, NameValue, SourceError, SourceOutcome};
use crate::{
    config::SourceConfig,
    models::{bibliographic::MAX_CATEGORIES, BibliographicRecord},
};

const NAME: &str = "Google Books";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u32,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<NameValue>>,
    publisher: Option<String>,
    published_date: Option<String>,
    page_count: Option<i32>,
    description: Option<String>,
    language: Option<String>,
    categories: Option<Vec<NameValue>>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

pub struct GoogleBooksSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksSource {
    pub fn new(config: &SourceConfig, user_agent: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client(config, user_agent)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Map a volumes search response to a record for `identifier`
    pub fn parse_response(
        identifier: &str,
        json: &str,
    ) -> Result<Option<BibliographicRecord>, SourceError> {
        let response: VolumesResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Google Books JSON: {}", e)))?;
        Ok(Self::map_response(identifier, response))
    }

    fn map_response(identifier: &str, response: VolumesResponse) -> Option<BibliographicRecord> {
        if response.total_items == 0 {
            return None;
        }
        let info = response.items.into_iter().next()?.volume_info;

        let mut subjects = names(info.categories);
        subjects.truncate(MAX_CATEGORIES);

        Some(BibliographicRecord {
            title: info.title,
            authors: names(info.authors),
            publisher: info.publisher,
            publication_date: info.published_date,
            page_count: info.page_count,
            description: info.description,
            language: info.language,
            subjects,
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
            ..BibliographicRecord::new(identifier, NAME)
        })
    }

    async fn fetch(&self, identifier: &str) -> Result<Option<BibliographicRecord>, SourceError> {
        let mut params = vec![("q", format!("isbn:{}", identifier))];
        if let Some(ref key) = self.api_key {
            params.push(("key", key.clone()));
        }

        let response = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&params)
            .send()
            .await?;

        let volumes: VolumesResponse = read_json(response).await?;
        Ok(Self::map_response(identifier, volumes))
    }
}

#[async_trait]
impl BibliographicSource for GoogleBooksSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn lookup(&self, identifier: &str) -> SourceOutcome {
        absorb(NAME, identifier, self.fetch(identifier).await)
    }
}
