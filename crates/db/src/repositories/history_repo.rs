//! Repository for the `history` table.
//!
//! One row aggregates every answer a user submitted for one book. Rows are
//! only ever created through [`HistoryRepo::append_answer`], whose upsert
//! against `uq_history_user_book` makes find-or-create atomic.

use chrono::Utc;
use lectern_core::notifications;
use lectern_core::progress::{level_for_total, AnswerEvent};
use lectern_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::history::{AnswerOutcome, HistoryRecord, RecordAnswer};
use crate::models::notification::CreateNotification;
use crate::repositories::{NotificationRepo, UserRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, book_id, total_questions, correct_answers, \
                        answers_details, created_at, updated_at";

/// Provides answer recording and lookups over history records.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Record one answer for `user_id` and apply any resulting level-up.
    ///
    /// The answer, the level change and the level-up notification are
    /// written in one transaction, so a failure leaves the counters as they
    /// were and a retried submission is counted once.
    pub async fn record_answer(
        pool: &PgPool,
        user_id: DbId,
        input: &RecordAnswer,
    ) -> Result<AnswerOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let record = Self::append_answer(&mut tx, user_id, input).await?;

        let total = Self::total_answers_for_user(&mut tx, user_id).await?;
        let level = level_for_total(total);
        let new_level = if UserRepo::raise_level(&mut tx, user_id, level).await? {
            let notice = CreateNotification::from_template(user_id, notifications::level_up(level));
            NotificationRepo::create_inner(&mut tx, &notice).await?;
            Some(level)
        } else {
            None
        };

        tx.commit().await?;

        if let Some(level) = new_level {
            tracing::info!(user_id, level, total_answers = total, "User levelled up");
        }
        Ok(AnswerOutcome { record, new_level })
    }

    /// Append one answer to the (user, book) record inside `tx`, creating the
    /// record on first use.
    ///
    /// A single `INSERT ... ON CONFLICT DO UPDATE` appends the event and bumps
    /// both counters, so concurrent submissions neither create duplicate
    /// records nor lose increments. Fails with a foreign-key violation when
    /// the book does not exist.
    pub async fn append_answer(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
        input: &RecordAnswer,
    ) -> Result<HistoryRecord, sqlx::Error> {
        let event = AnswerEvent {
            question_id: input.question_id,
            user_answer: input.user_answer.clone(),
            is_correct: input.is_correct,
            timestamp: Utc::now(),
        };
        let query = format!(
            "INSERT INTO history
                (user_id, book_id, total_questions, correct_answers, answers_details)
             VALUES ($1, $2, 1, CASE WHEN $3 THEN 1 ELSE 0 END, jsonb_build_array($4::jsonb))
             ON CONFLICT (user_id, book_id) DO UPDATE SET
                total_questions = history.total_questions + 1,
                correct_answers = history.correct_answers + CASE WHEN $3 THEN 1 ELSE 0 END,
                answers_details = history.answers_details || jsonb_build_array($4::jsonb)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(user_id)
            .bind(input.book_id)
            .bind(input.is_correct)
            .bind(Json(&event))
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a history record by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HistoryRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM history WHERE id = $1");
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the record for a (user, book) pair, if the user has answered anything.
    pub async fn find_for_user_book(
        pool: &PgPool,
        user_id: DbId,
        book_id: DbId,
    ) -> Result<Option<HistoryRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM history WHERE user_id = $1 AND book_id = $2");
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_optional(pool)
            .await
    }

    /// List every history record, most recently updated first.
    pub async fn list(pool: &PgPool) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM history ORDER BY updated_at DESC");
        sqlx::query_as::<_, HistoryRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// List a user's records, optionally restricted to one book.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        book_id: Option<DbId>,
    ) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history
             WHERE user_id = $1 AND ($2::BIGINT IS NULL OR book_id = $2)
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(user_id)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// List every user's record for one book, most recently updated first.
    pub async fn list_for_book(
        pool: &PgPool,
        book_id: DbId,
    ) -> Result<Vec<HistoryRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history WHERE book_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, HistoryRecord>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// Total answers a user has submitted across all books.
    pub async fn total_answers_for_user(
        tx: &mut Transaction<'_, Postgres>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(total_questions)::BIGINT FROM history WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await?;
        Ok(total.unwrap_or(0))
    }

    /// Delete a history record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM history WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
