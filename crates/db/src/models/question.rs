//! Question entity model and DTOs.

use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub book_id: DbId,
    pub chapter_id: Option<String>,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub ai_answer: Option<String>,
    pub question_level: String,
    pub is_generated: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub book_id: DbId,
    pub chapter_id: Option<String>,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub ai_answer: Option<String>,
    /// Defaults to `medium` when absent.
    pub question_level: Option<String>,
    /// Defaults to `true` when absent.
    pub is_generated: Option<bool>,
}

/// DTO for updating a question. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateQuestion {
    pub chapter_id: Option<String>,
    pub question_text: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub ai_answer: Option<String>,
    pub question_level: Option<String>,
}
