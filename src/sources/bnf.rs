//! Bibliothèque nationale de France, via the data.bnf.fr SPARQL endpoint
//!
//! The query matches manifestations on `bnf-onto:isbn` and returns one row per
//! manifestation, authors and subjects aggregated; rows are folded into a single record.

use std::collections::HashMap;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::{absorb, http_client, read_json, BibliographicSource, SourceError, SourceOutcome};
use crate::{
    config::SourceConfig,
    models::{bibliographic::MAX_CATEGORIES, BibliographicRecord},
};

const NAME: &str = "BnF";
const SPARQL_JSON: &str = "application/sparql-results+json";
/// Separator of aggregated multi-valued attributes
const SEPARATOR: &str = "|";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)").expect("valid page count regex"));

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    #[serde(rename = "type")]
    kind: Option<String>,
    value: String,
}

pub struct BnfSource {
    client: reqwest::Client,
    endpoint: String,
}

impl BnfSource {
    pub fn new(config: &SourceConfig, user_agent: &str) -> Result<Self, SourceError> {
        Ok(Self {
            client: http_client(config, user_agent)?,
            endpoint: config.base_url.clone(),
        })
    }

    /// SPARQL query selecting every known attribute of the manifestation carrying `isbn`.
    ///
    /// ISBNs are compared without hyphens or spaces, and multi-valued attributes are
    /// aggregated so each manifestation comes back as a single row.
    pub fn build_query(isbn: &str) -> String {
        format!(
            r#"PREFIX bnf-onto: <http://data.bnf.fr/ontology/bnf-onto/>
PREFIX dcterms: <http://purl.org/dc/terms/>
PREFIX foaf: <http://xmlns.com/foaf/0.1/>
PREFIX rdagroup1elements: <http://rdvocab.info/Elements/>
PREFIX rdarelationships: <http://rdvocab.info/RDARelationshipsWEMI/>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
SELECT ?manifestation
  (SAMPLE(?titleValue) AS ?title)
  (SAMPLE(?publisherValue) AS ?publisher)
  (SAMPLE(?dateValue) AS ?date)
  (SAMPLE(?extentValue) AS ?extent)
  (SAMPLE(?descriptionValue) AS ?description)
  (SAMPLE(?languageValue) AS ?language)
  (GROUP_CONCAT(DISTINCT ?author; separator="{sep}") AS ?authors)
  (GROUP_CONCAT(DISTINCT ?subject; separator="{sep}") AS ?subjects)
WHERE {{
  ?manifestation bnf-onto:isbn ?isbn .
  FILTER(UCASE(REPLACE(STR(?isbn), "[- ]", "")) = "{key}")
  OPTIONAL {{ ?manifestation dcterms:title ?titleValue }}
  OPTIONAL {{ ?manifestation dcterms:publisher ?publisherValue }}
  OPTIONAL {{ ?manifestation dcterms:date ?dateValue }}
  OPTIONAL {{ ?manifestation rdagroup1elements:extent ?extentValue }}
  OPTIONAL {{ ?manifestation dcterms:description ?descriptionValue }}
  OPTIONAL {{ ?manifestation dcterms:language ?languageValue }}
  OPTIONAL {{
    ?manifestation rdarelationships:workManifested ?work .
    OPTIONAL {{ ?work dcterms:creator ?creator . ?creator foaf:name ?author }}
    OPTIONAL {{ ?work dcterms:subject ?topic . ?topic skos:prefLabel ?subject }}
  }}
}}
GROUP BY ?manifestation
LIMIT 5"#,
            sep = SEPARATOR,
            key = escape_literal(&isbn_key(isbn))
        )
    }

    /// Fold SPARQL JSON result rows into a record for `identifier`
    pub fn parse_response(
        identifier: &str,
        json: &str,
    ) -> Result<Option<BibliographicRecord>, SourceError> {
        let response: SparqlResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("Invalid SPARQL JSON: {}", e)))?;
        Ok(Self::map_response(identifier, response))
    }

    fn map_response(identifier: &str, response: SparqlResponse) -> Option<BibliographicRecord> {
        let rows = response.results.bindings;
        if rows.is_empty() {
            return None;
        }

        let first = |var: &str| -> Option<String> {
            rows.iter()
                .filter_map(|row| row.get(var))
                .map(|v| v.value.trim())
                .find(|v| !v.is_empty())
                .map(str::to_string)
        };

        let mut authors: Vec<String> = Vec::new();
        let mut subjects: Vec<String> = Vec::new();
        for row in &rows {
            for author in aggregated(row, "authors") {
                if !authors.contains(&author) {
                    authors.push(author);
                }
            }
            for subject in aggregated(row, "subjects") {
                if !subjects.contains(&subject) && subjects.len() < MAX_CATEGORIES {
                    subjects.push(subject);
                }
            }
        }

        let page_count = first("extent").and_then(|extent| {
            LEADING_NUMBER
                .captures(&extent)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        });

        // Languages are vocabulary URIs, e.g. http://id.loc.gov/vocabulary/iso639-2/fre
        let language = first("language")
            .and_then(|uri| uri.rsplit('/').next().map(str::to_string))
            .filter(|code| !code.is_empty());

        Some(BibliographicRecord {
            title: first("title"),
            authors,
            publisher: first("publisher"),
            publication_date: first("date"),
            page_count,
            description: first("description"),
            language,
            subjects,
            ..BibliographicRecord::new(identifier, NAME)
        })
    }

    async fn fetch(&self, identifier: &str) -> Result<Option<BibliographicRecord>, SourceError> {
        let query = Self::build_query(identifier);
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, SPARQL_JSON)
            .query(&[("query", query.as_str()), ("format", SPARQL_JSON)])
            .send()
            .await?;

        let results: SparqlResponse = read_json(response).await?;
        Ok(Self::map_response(identifier, results))
    }
}

#[async_trait]
impl BibliographicSource for BnfSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn lookup(&self, identifier: &str) -> SourceOutcome {
        absorb(NAME, identifier, self.fetch(identifier).await)
    }
}

/// Literal value of `var` in a row; URIs and blank nodes are skipped
fn literal(row: &HashMap<String, SparqlValue>, var: &str) -> Option<String> {
    let value = row.get(var)?;
    match value.kind.as_deref() {
        Some("uri") | Some("bnode") => None,
        _ => {
            let text = value.value.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
    }
}

/// Values of an aggregated column
fn aggregated(row: &HashMap<String, SparqlValue>, var: &str) -> Vec<String> {
    literal(row, var)
        .map(|joined| {
            joined
                .split(SEPARATOR)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// ISBN as compared against the catalogue: no hyphens or spaces, uppercase check digit
fn isbn_key(isbn: &str) -> String {
    isbn.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Escape a value for use inside a double-quoted SPARQL literal
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
