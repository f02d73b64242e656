//! Books repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, SortOrder, UpdateBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books matching the filters
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = list_query(query)
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Livre non trouvé".to_string()))
    }

    /// Insert a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                id, title, author, edition, isbn, count, placard, shelf, category,
                description, status, date_added, last_modified, barcode, language,
                pages, publication_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'disponible', $11, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.edition)
        .bind(&book.isbn)
        .bind(book.count)
        .bind(&book.placard)
        .bind(&book.shelf)
        .bind(&book.category)
        .bind(&book.description)
        .bind(now)
        .bind(&book.barcode)
        .bind(&book.language)
        .bind(book.pages)
        .bind(book.publication_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update the provided fields and touch `last_modified`
    pub async fn update(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        update_query(id, data, Utc::now())
            .build_query_as::<Book>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Livre non trouvé".to_string()))
    }

    /// Delete a book
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Livre non trouvé".to_string()));
        }
        Ok(())
    }
}

/// `SELECT` for the list filters; every user value is bound
fn list_query(query: &BookQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM books WHERE 1=1");

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR author ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR isbn ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR barcode ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(ref placard) = query.placard {
        builder.push(" AND placard = ").push_bind(placard.clone());
    }
    if let Some(ref shelf) = query.shelf {
        builder.push(" AND shelf = ").push_bind(shelf.clone());
    }
    if let Some(ref category) = query.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(status) = query.status {
        builder.push(" AND status = ").push_bind(status.as_str());
    }

    let sort = query.sort_by.unwrap_or_default();
    let order = match query.sort_order.unwrap_or_default() {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    builder.push(format!(" ORDER BY {} {}, id", sort.column(), order));
    builder
}

/// `UPDATE` setting only the provided fields
fn update_query(id: Uuid, data: &UpdateBook, now: DateTime<Utc>) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE books SET last_modified = ");
    builder.push_bind(now);

    macro_rules! set_field {
        ($column:literal, $value:expr) => {
            if let Some(value) = $value {
                builder.push(concat!(", ", $column, " = ")).push_bind(value);
            }
        };
    }

    set_field!("title", data.title.clone());
    set_field!("author", data.author.clone());
    set_field!("edition", data.edition.clone());
    set_field!("isbn", data.isbn.clone());
    set_field!("count", data.count);
    set_field!("placard", data.placard.clone());
    set_field!("shelf", data.shelf.clone());
    set_field!("category", data.category.clone());
    set_field!("description", data.description.clone());
    set_field!("status", data.status.map(|s| s.as_str()));
    set_field!("barcode", data.barcode.clone());
    set_field!("language", data.language.clone());
    set_field!("pages", data.pages);
    set_field!("publication_year", data.publication_year);

    builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    builder
}

/// `ILIKE` pattern matching `search` anywhere, with `%`, `_` and `\` taken literally
fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
