//! History (per-user, per-book quiz aggregate) model and DTOs.

use lectern_core::progress::{AnswerEvent, HistoryTotals};
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub book_id: DbId,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub answers_details: Json<Vec<AnswerEvent>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HistoryRecord {
    /// The record's counters, for statistics derivation.
    pub fn totals(&self) -> HistoryTotals {
        HistoryTotals {
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
        }
    }
}

/// DTO for recording one answer. The user is taken from the session.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAnswer {
    pub book_id: DbId,
    pub question_id: DbId,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Outcome of recording one answer.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub record: HistoryRecord,
    /// The user's new level, when this answer raised it.
    pub new_level: Option<i32>,
}
