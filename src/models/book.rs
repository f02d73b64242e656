//! Book (catalog entry) model and related types

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::bibliographic::{BibliographicRecord, Placement};

pub const DEFAULT_CATEGORY: &str = "Général";
pub const DEFAULT_LANGUAGE: &str = "fr";
const UNTITLED: &str = "Livre sans titre";
const UNKNOWN_AUTHOR: &str = "Auteur inconnu";

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("valid year regex"));

/// Circulation status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    #[default]
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "emprunté")]
    Borrowed,
    #[serde(rename = "perdu")]
    Lost,
    #[serde(rename = "en_maintenance")]
    Maintenance,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "disponible",
            BookStatus::Borrowed => "emprunté",
            BookStatus::Lost => "perdu",
            BookStatus::Maintenance => "en_maintenance",
        }
    }
}

impl From<String> for BookStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "emprunté" => BookStatus::Borrowed,
            "perdu" => BookStatus::Lost,
            "en_maintenance" => BookStatus::Maintenance,
            _ => BookStatus::Available,
        }
    }
}

/// Full book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub edition: String,
    pub isbn: String,
    pub count: i32,
    pub placard: String,
    pub shelf: String,
    pub category: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: BookStatus,
    pub date_added: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub barcode: String,
    pub language: String,
    pub pages: Option<i32>,
    pub publication_year: Option<i32>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: String,
    #[validate(length(min = 1, message = "L'auteur est obligatoire"))]
    pub author: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default = "default_count")]
    #[validate(range(min = 1, message = "Le nombre d'exemplaires doit être positif"))]
    pub count: i32,
    #[validate(length(min = 1, message = "Le placard est obligatoire"))]
    pub placard: String,
    #[validate(length(min = 1, message = "L'étagère est obligatoire"))]
    pub shelf: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub pages: Option<i32>,
    pub publication_year: Option<i32>,
}

impl CreateBook {
    /// Same request with surrounding whitespace removed from the required fields
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            placard: self.placard.trim().to_string(),
            shelf: self.shelf.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            barcode: self.barcode.trim().to_string(),
            ..self
        }
    }

    /// Catalog entry for a looked-up record, placed where the operator asked.
    pub fn from_lookup(
        record: &BibliographicRecord,
        placement: &Placement,
        barcode: Option<&str>,
    ) -> Self {
        let title = record
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let author = if record.authors.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            record.authors.join(", ")
        };

        Self {
            title,
            author,
            edition: record.publisher.clone().unwrap_or_default(),
            isbn: record.identifier.clone(),
            count: 1,
            placard: placement.container.clone(),
            shelf: placement.shelf.clone(),
            category: DEFAULT_CATEGORY.to_string(),
            description: record.description.clone().unwrap_or_default(),
            barcode: barcode.unwrap_or_default().to_string(),
            language: record
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            pages: record.page_count.filter(|p| *p > 0),
            publication_year: record.publication_date.as_deref().and_then(publication_year),
        }
    }
}

/// Update book request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Le titre ne peut pas être vide"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "L'auteur ne peut pas être vide"))]
    pub author: Option<String>,
    pub edition: Option<String>,
    pub isbn: Option<String>,
    #[validate(range(min = 1, message = "Le nombre d'exemplaires doit être positif"))]
    pub count: Option<i32>,
    pub placard: Option<String>,
    pub shelf: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub status: Option<BookStatus>,
    pub barcode: Option<String>,
    pub language: Option<String>,
    pub pages: Option<i32>,
    pub publication_year: Option<i32>,
}

impl UpdateBook {
    /// Same request with surrounding whitespace removed from the identifying fields
    pub fn trimmed(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            title: trim(self.title),
            author: trim(self.author),
            placard: trim(self.placard),
            shelf: trim(self.shelf),
            isbn: trim(self.isbn),
            barcode: trim(self.barcode),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.edition.is_none()
            && self.isbn.is_none()
            && self.count.is_none()
            && self.placard.is_none()
            && self.shelf.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.barcode.is_none()
            && self.language.is_none()
            && self.pages.is_none()
            && self.publication_year.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookSort {
    #[default]
    Title,
    Author,
    DateAdded,
}

impl BookSort {
    pub fn column(&self) -> &'static str {
        match self {
            BookSort::Title => "title",
            BookSort::Author => "author",
            BookSort::DateAdded => "date_added",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Book list filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Free-text search on title, author, ISBN and barcode
    pub search: Option<String>,
    pub placard: Option<String>,
    pub shelf: Option<String>,
    pub category: Option<String>,
    pub status: Option<BookStatus>,
    pub sort_by: Option<BookSort>,
    pub sort_order: Option<SortOrder>,
}

fn default_count() -> i32 {
    1
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Year of a free-form publication date ("1970", "October 1, 1988", "2002-05-14")
fn publication_year(date: &str) -> Option<i32> {
    if let Ok(parsed) = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        return Some(parsed.year());
    }
    YEAR.captures(date)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
