//! Placards and shelves repository

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{conflict_on_unique, AppError, AppResult},
    models::storage::{CreatePlacard, CreateShelf, Placard, Shelf},
};

#[derive(Clone)]
pub struct StorageRepository {
    pool: Pool<Postgres>,
}

impl StorageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list_placards(&self) -> AppResult<Vec<Placard>> {
        let placards = sqlx::query_as::<_, Placard>("SELECT * FROM placards ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(placards)
    }

    pub async fn create_placard(&self, placard: &CreatePlacard) -> AppResult<Placard> {
        sqlx::query_as::<_, Placard>(
            r#"
            INSERT INTO placards (id, name, description, location, storage_type, capacity, date_created)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&placard.name)
        .bind(&placard.description)
        .bind(&placard.location)
        .bind(placard.storage_type.as_str())
        .bind(placard.capacity)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, format!("Le placard {} existe déjà", placard.name)))
    }

    pub async fn delete_placard(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM placards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Placard non trouvé".to_string()));
        }
        Ok(())
    }

    /// List shelves, optionally only those of one placard
    pub async fn list_shelves(&self, placard: Option<&str>) -> AppResult<Vec<Shelf>> {
        let shelves = match placard {
            Some(name) => {
                sqlx::query_as::<_, Shelf>(
                    "SELECT * FROM shelves WHERE placard_name = $1 ORDER BY position NULLS LAST, name",
                )
                .bind(name)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Shelf>(
                    "SELECT * FROM shelves ORDER BY placard_name, position NULLS LAST, name",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(shelves)
    }

    pub async fn create_shelf(&self, shelf: &CreateShelf) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>(
            r#"
            INSERT INTO shelves (id, name, placard_name, position, capacity, description, date_created)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&shelf.name)
        .bind(&shelf.placard_name)
        .bind(shelf.position)
        .bind(shelf.capacity)
        .bind(&shelf.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                format!(
                    "L'étagère {} existe déjà dans le placard {}",
                    shelf.name, shelf.placard_name
                ),
            )
        })
    }

    pub async fn delete_shelf(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM shelves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Étagère non trouvée".to_string()));
        }
        Ok(())
    }
}
