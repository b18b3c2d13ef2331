//! # Book Repository
//!
//! Database operations for the catalog.
//!
//! Stock counters on a book are owned by the order ledger
//! ([`crate::repository::order`]); this repository only touches them when a
//! catalog entry is created or explicitly corrected.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use maktaba_core::validation::validate_title;
use maktaba_core::Book;

/// Repository for book database operations.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, publisher,
                   price_cents, cost_cents,
                   quantity_left, delivering_stock, sold_stock,
                   created_at, updated_at
            FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Lists the catalog ordered by title.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, publisher,
                   price_cents, cost_cents,
                   quantity_left, delivering_stock, sold_stock,
                   created_at, updated_at
            FROM books
            ORDER BY title
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Inserts a new book (catalog entry or CSV import row).
    ///
    /// The id should be generated beforehand, see [`generate_book_id`].
    pub async fn insert(&self, book: &Book) -> DbResult<Book> {
        validate_title(&book.title)?;

        debug!(id = %book.id, title = %book.title, "Inserting book");

        sqlx::query(
            r#"
            INSERT INTO books (
                id, title, author, publisher,
                price_cents, cost_cents,
                quantity_left, delivering_stock, sold_stock,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.price_cents)
        .bind(book.cost_cents)
        .bind(book.quantity_left)
        .bind(book.delivering_stock)
        .bind(book.sold_stock)
        .bind(book.created_at)
        .bind(book.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(book.clone())
    }

    /// Updates a book's catalog fields (title, prices, available stock).
    ///
    /// Does not touch `delivering_stock`/`sold_stock`: those belong to the
    /// ledger and a manual edit would break pipeline accounting.
    pub async fn update(&self, book: &Book) -> DbResult<()> {
        validate_title(&book.title)?;

        debug!(id = %book.id, "Updating book");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE books SET
                title = ?2,
                author = ?3,
                publisher = ?4,
                price_cents = ?5,
                cost_cents = ?6,
                quantity_left = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.publisher)
        .bind(book.price_cents)
        .bind(book.cost_cents)
        .bind(book.quantity_left)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", &book.id));
        }

        Ok(())
    }

    /// Deletes a book.
    ///
    /// Order items keep their title/price snapshots, so order history
    /// survives; only new orders for this book become impossible.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting book");

        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Book", id));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new book ID.
pub fn generate_book_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn sample_book(title: &str, quantity: i64) -> Book {
        let now = Utc::now();
        Book {
            id: generate_book_id(),
            title: title.to_string(),
            author: Some("Kateb Yacine".to_string()),
            publisher: None,
            price_cents: 95_000,
            cost_cents: 60_000,
            quantity_left: quantity,
            delivering_stock: 0,
            sold_stock: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = sample_book("Nedjma", 10);

        db.books().insert(&book).await.unwrap();

        let loaded = db.books().get_by_id(&book.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Nedjma");
        assert_eq!(loaded.quantity_left, 10);
        assert_eq!(loaded.delivering_stock, 0);
        assert_eq!(loaded.sold_stock, 0);
    }

    #[tokio::test]
    async fn test_insert_rejects_empty_title() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = sample_book("  ", 1);

        assert!(db.books().insert(&book).await.is_err());
        assert_eq!(db.books().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = sample_book("Nedjma", 1);

        let err = db.books().update(&book).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = sample_book("Nedjma", 1);
        db.books().insert(&book).await.unwrap();

        db.books().delete(&book.id).await.unwrap();
        assert!(db.books().get_by_id(&book.id).await.unwrap().is_none());
    }
}
