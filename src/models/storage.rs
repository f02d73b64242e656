//! Storage locations: placards (containers) and their shelves

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of storage furniture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    #[default]
    Placard,
    Bac,
    Mur,
    EtagereMobile,
    Bibliotheque,
    Autre,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Placard => "placard",
            StorageType::Bac => "bac",
            StorageType::Mur => "mur",
            StorageType::EtagereMobile => "etagere_mobile",
            StorageType::Bibliotheque => "bibliotheque",
            StorageType::Autre => "autre",
        }
    }
}

impl From<String> for StorageType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bac" => StorageType::Bac,
            "mur" => StorageType::Mur,
            "etagere_mobile" => StorageType::EtagereMobile,
            "bibliotheque" => StorageType::Bibliotheque,
            "autre" => StorageType::Autre,
            _ => StorageType::Placard,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Placard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    #[sqlx(try_from = "String")]
    pub storage_type: StorageType,
    pub capacity: Option<i32>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePlacard {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub storage_type: StorageType,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
}

impl CreatePlacard {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shelf {
    pub id: Uuid,
    pub name: String,
    pub placard_name: String,
    pub position: Option<i32>,
    pub capacity: Option<i32>,
    pub description: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateShelf {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub name: String,
    #[validate(length(min = 1, message = "Le placard est obligatoire"))]
    pub placard_name: String,
    pub position: Option<i32>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub description: String,
}

impl CreateShelf {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            placard_name: self.placard_name.trim().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ShelfQuery {
    /// Only shelves of this placard
    pub placard: Option<String>,
}
