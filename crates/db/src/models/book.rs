//! Book entity model and DTOs.
//!
//! Chapters are embedded in the `chapters` JSONB column; see
//! [`lectern_core::chapters`] for the operations that mutate them.

use lectern_core::chapters::Chapter;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: bool,
    pub author_id: Option<DbId>,
    pub chapters: Json<Vec<Chapter>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new book. The author is taken from the session.
#[derive(Debug, Deserialize)]
pub struct CreateBook {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: Option<bool>,
}

/// DTO for updating a book. Chapters are not updatable through this DTO.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBook {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub is_public: Option<bool>,
}

/// Result of a chapter mutation performed under the book's row lock.
#[derive(Debug)]
pub enum ChapterChange<T> {
    /// No book with the requested id exists.
    BookNotFound,
    /// The chapter operation itself failed; nothing was written.
    Rejected(lectern_core::error::CoreError),
    /// The change was committed. Carries the operation's output and the saved book.
    Applied { output: T, book: Book },
}
