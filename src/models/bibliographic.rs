//! Normalized bibliographic record produced by ISBN lookups

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Subject categories kept per record
pub const MAX_CATEGORIES: usize = 5;

/// Book metadata returned by a bibliographic source, in one shape for every source.
///
/// The identifier is always the code that was queried, never a value read back from
/// the source. A record only counts as a hit when it carries a non-empty title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BibliographicRecord {
    /// Queried code, echoed back
    #[serde(rename = "isbn")]
    pub identifier: String,
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    /// Publication date as provided by the source (format varies)
    pub publication_date: Option<String>,
    pub page_count: Option<i32>,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Subject categories, at most [`MAX_CATEGORIES`]
    #[serde(rename = "categories", default)]
    pub subjects: Vec<String>,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: Option<String>,
    /// Name of the source that produced this record
    pub source: String,
}

impl BibliographicRecord {
    /// Empty record for `identifier`, attributed to `source`
    pub fn new(identifier: &str, source: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: None,
            authors: Vec::new(),
            publisher: None,
            publication_date: None,
            page_count: None,
            description: None,
            language: None,
            subjects: Vec::new(),
            thumbnail_url: None,
            source: source.to_string(),
        }
    }

    /// Whether the record carries a usable title
    pub fn is_hit(&self) -> bool {
        self.title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Storage destination chosen by the operator for a scanned book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Placement {
    /// Container name (placard)
    #[serde(alias = "placard")]
    pub container: String,
    pub shelf: String,
}
