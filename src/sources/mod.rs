//! External bibliographic sources
//!
//! Each source queries one provider for an identifier (usually an ISBN) and maps the
//! provider's response into a [`BibliographicRecord`]. Sources never fail towards their
//! caller: transport errors, bad statuses, timeouts and unreadable bodies are logged and
//! reported as [`SourceOutcome::NoMatch`].

pub mod bnf;
pub mod google_books;
pub mod open_library;

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

use crate::{config::SourceConfig, models::BibliographicRecord};

pub use bnf::BnfSource;
pub use google_books::GoogleBooksSource;
pub use open_library::OpenLibrarySource;

/// Result of asking one source about an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Found(BibliographicRecord),
    NoMatch,
}

/// Failure while talking to a source. Never leaves the source module.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// A bibliographic data provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BibliographicSource: Send + Sync {
    /// Display name, copied into the `source` field of produced records
    fn name(&self) -> &'static str;

    /// Look up `identifier`; any failure is reported as `NoMatch`
    async fn lookup(&self, identifier: &str) -> SourceOutcome;
}

/// Collapse a fetch result into an outcome, logging what was absorbed
pub(crate) fn absorb(
    source: &str,
    identifier: &str,
    result: Result<Option<BibliographicRecord>, SourceError>,
) -> SourceOutcome {
    match result {
        Ok(Some(record)) => SourceOutcome::Found(record),
        Ok(None) => {
            tracing::debug!("{}: no record for {}", source, identifier);
            SourceOutcome::NoMatch
        }
        Err(e) => {
            tracing::warn!("{}: lookup of {} failed: {}", source, identifier, e);
            SourceOutcome::NoMatch
        }
    }
}

/// HTTP client bounded by the source's timeout
pub(crate) fn http_client(
    config: &SourceConfig,
    user_agent: &str,
) -> Result<reqwest::Client, SourceError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Check the status and decode a JSON body
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status));
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SourceError::Parse(e.to_string()))
}

/// A name that providers send either as a bare string or as an object with a `name`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NameValue {
    Plain(String),
    Named { name: String },
    Other(serde_json::Value),
}

impl NameValue {
    fn into_name(self) -> Option<String> {
        let name = match self {
            NameValue::Plain(name) | NameValue::Named { name } => name,
            NameValue::Other(_) => return None,
        };
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

/// Flatten mixed name values to plain strings, in order
pub(crate) fn names(values: Option<Vec<NameValue>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(NameValue::into_name)
        .collect()
}

/// Free text sent either as a string or as `{"value": ...}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextValue {
    Plain(String),
    Typed { value: String },
}

impl From<TextValue> for String {
    fn from(text: TextValue) -> Self {
        match text {
            TextValue::Plain(value) | TextValue::Typed { value } => value,
        }
    }
}
