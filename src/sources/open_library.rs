//! Open Library books API
//!
//! API docs: https://openlibrary.org/dev/docs/api/books

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    absorb, http_client, names, read_json, BibliographicSource, NameValue, SourceError,
    SourceOutcome, TextValue,
};
use crate::{
    config::SourceConfig,
    models::{bibliographic::MAX_CATEGORIES, BibliographicRecord},
};

const NAME: &str = "Open Library";

#[derive(Debug, Deserialize)]
struct OpenLibraryBook {
    title: Option<String>,
    authors: Option<Vec<NameValue>>,
    publishers: Option<Vec<NameValue>>,
    publish_date: Option<String>,
    number_of_pages: Option<i32>,
    description: Option<TextValue>,
    subjects: Option<Vec<NameValue>>,
    cover: Option<Cover>,
}

#[derive(Debug, Deserialize)]
struct Cover {
    medium: Option<String>,
}

pub struct OpenLibrarySource {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibrarySource {
    pub fn new(config: &SourceConfig, user_agent: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client(config, user_agent)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn bibkey(identifier: &str) -> String {
        format!("ISBN:{}", identifier)
    }

    /// Map a `jscmd=data` response to a record for `identifier`
    pub fn parse_response(
        identifier: &str,
        json: &str,
    ) -> Result<Option<BibliographicRecord>, SourceError> {
        let books: HashMap<String, OpenLibraryBook> = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid Open Library JSON: {}", e)))?;
        Ok(Self::map_response(identifier, books))
    }

    fn map_response(
        identifier: &str,
        mut books: HashMap<String, OpenLibraryBook>,
    ) -> Option<BibliographicRecord> {
        let book = books.remove(&Self::bibkey(identifier))?;

        let mut subjects = names(book.subjects);
        subjects.truncate(MAX_CATEGORIES);

        Some(BibliographicRecord {
            title: book.title,
            authors: names(book.authors),
            // joined even when empty: zero publishers give ""
            publisher: Some(names(book.publishers).join(", ")),
            publication_date: book.publish_date,
            page_count: book.number_of_pages,
            description: book.description.map(String::from),
            subjects,
            thumbnail_url: book.cover.and_then(|c| c.medium),
            ..BibliographicRecord::new(identifier, NAME)
        })
    }

    async fn fetch(&self, identifier: &str) -> Result<Option<BibliographicRecord>, SourceError> {
        let bibkey = Self::bibkey(identifier);
        let response = self
            .client
            .get(format!("{}/api/books", self.base_url))
            .query(&[
                ("bibkeys", bibkey.as_str()),
                ("format", "json"),
                ("jscmd", "data"),
            ])
            .send()
            .await?;

        let books: HashMap<String, OpenLibraryBook> = read_json(response).await?;
        Ok(Self::map_response(identifier, books))
    }
}

#[async_trait]
impl BibliographicSource for OpenLibrarySource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn lookup(&self, identifier: &str) -> SourceOutcome {
        absorb(NAME, identifier, self.fetch(identifier).await)
    }
}
