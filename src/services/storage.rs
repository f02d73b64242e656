//! Storage locations service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::storage::{CreatePlacard, CreateShelf, Placard, Shelf},
    repository::Repository,
};

#[derive(Clone)]
pub struct StorageService {
    repository: Repository,
}

impl StorageService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_placards(&self) -> AppResult<Vec<Placard>> {
        self.repository.storage.list_placards().await
    }

    pub async fn create_placard(&self, placard: CreatePlacard) -> AppResult<Placard> {
        let placard = placard.trimmed();
        placard.validate()?;
        self.repository.storage.create_placard(&placard).await
    }

    pub async fn delete_placard(&self, id: Uuid) -> AppResult<()> {
        self.repository.storage.delete_placard(id).await
    }

    pub async fn list_shelves(&self, placard: Option<&str>) -> AppResult<Vec<Shelf>> {
        self.repository.storage.list_shelves(placard).await
    }

    pub async fn create_shelf(&self, shelf: CreateShelf) -> AppResult<Shelf> {
        let shelf = shelf.trimmed();
        shelf.validate()?;
        self.repository.storage.create_shelf(&shelf).await
    }

    pub async fn delete_shelf(&self, id: Uuid) -> AppResult<()> {
        self.repository.storage.delete_shelf(id).await
    }
}
