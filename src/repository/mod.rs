//! Repository layer for database operations

pub mod books;
pub mod storage;

use sqlx::{Pool, Postgres};

/// Main repository struct, one repository per table group
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub storage: storage::StorageRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            storage: storage::StorageRepository::new(pool),
        }
    }
}
