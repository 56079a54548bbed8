//! Repository for the `books` table and its embedded chapters.

use lectern_core::chapters::Chapter;
use lectern_core::error::CoreError;
use lectern_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::book::{Book, ChapterChange, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category, description, cover_image, is_public, author_id, \
                        chapters, created_at, updated_at";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book owned by `author_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateBook,
    ) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (name, category, description, cover_image, is_public, author_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, false), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(input.is_public)
            .bind(author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a book by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all books, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY created_at DESC");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// List books with `is_public = true`, newest first.
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE is_public = true ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// List books in a category (exact match), newest first.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE category = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// List books authored by `author_id`, newest first.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE author_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Update a book. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                cover_image = COALESCE($5, cover_image),
                is_public = COALESCE($6, is_public)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.description)
            .bind(&input.cover_image)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_public`. Returns `None` if the book does not exist.
    pub async fn toggle_public(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET is_public = NOT is_public WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book. Its questions and history records cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply `change` to the book's chapter list while holding a row lock.
    ///
    /// The book row is locked with `SELECT ... FOR UPDATE`, `change` runs on
    /// the loaded list, and the new list is written back in the same
    /// transaction. If `change` fails the transaction is rolled back and the
    /// stored list is untouched.
    pub async fn modify_chapters<T, F>(
        pool: &PgPool,
        book_id: DbId,
        change: F,
    ) -> Result<ChapterChange<T>, sqlx::Error>
    where
        F: FnOnce(&mut Vec<Chapter>) -> Result<T, CoreError>,
    {
        let mut tx = pool.begin().await?;

        let row: Option<(Json<Vec<Chapter>>,)> =
            sqlx::query_as("SELECT chapters FROM books WHERE id = $1 FOR UPDATE")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((Json(mut chapters),)) = row else {
            return Ok(ChapterChange::BookNotFound);
        };

        let output = match change(&mut chapters) {
            Ok(output) => output,
            Err(err) => {
                tx.rollback().await?;
                return Ok(ChapterChange::Rejected(err));
            }
        };

        let query = format!("UPDATE books SET chapters = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_id)
            .bind(Json(&chapters))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(book_id, chapters = chapters.len(), "Book chapters updated");
        Ok(ChapterChange::Applied { output, book })
    }
}
