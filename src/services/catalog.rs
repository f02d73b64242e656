//! Catalog management service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        Placement,
    },
    repository::Repository,
};

use super::isbn::IsbnLookupService;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    lookup: IsbnLookupService,
}

impl CatalogService {
    pub fn new(repository: Repository, lookup: IsbnLookupService) -> Self {
        Self { repository, lookup }
    }

    /// Search books with filters
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(query).await
    }

    pub async fn get_book(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        let book = book.trimmed();
        book.validate()?;
        let created = self.repository.books.create(&book).await?;
        tracing::info!("Book created: {} ({})", created.title, created.id);
        Ok(created)
    }

    pub async fn update_book(&self, id: Uuid, data: UpdateBook) -> AppResult<Book> {
        let data = data.trimmed();
        data.validate()?;
        if data.is_empty() {
            return Err(AppError::Validation(
                "Au moins un champ doit être fourni".to_string(),
            ));
        }
        self.repository.books.update(id, &data).await
    }

    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: {}", id);
        Ok(())
    }

    /// Resolve `code` and add the resulting book at `placement`
    pub async fn import_from_lookup(&self, code: &str, placement: Placement) -> AppResult<Book> {
        let record = self.lookup.resolve(code).await?;
        let book = CreateBook::from_lookup(&record, &placement, Some(code));
        tracing::info!("Importing {} from {}", code, record.source);
        self.create_book(book).await
    }
}
