//! Repository for the `questions` table.

use lectern_core::questions::{QuestionDraft, DEFAULT_LEVEL};
use lectern_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question, UpdateQuestion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, book_id, chapter_id, question_text, options, correct_answer, \
                        ai_answer, question_level, is_generated, created_at";

/// Provides CRUD operations for quiz questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions
                (book_id, chapter_id, question_text, options, correct_answer, ai_answer,
                 question_level, is_generated)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, $8), COALESCE($9, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.book_id)
            .bind(&input.chapter_id)
            .bind(&input.question_text)
            .bind(&input.options)
            .bind(&input.correct_answer)
            .bind(&input.ai_answer)
            .bind(&input.question_level)
            .bind(DEFAULT_LEVEL)
            .bind(input.is_generated)
            .fetch_one(pool)
            .await
    }

    /// Persist generated drafts for one chapter in a single transaction.
    ///
    /// Either every draft is stored (with `is_generated = true`) or none is.
    pub async fn create_generated(
        pool: &PgPool,
        book_id: DbId,
        chapter_id: &str,
        drafts: &[QuestionDraft],
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions
                (book_id, chapter_id, question_text, options, correct_answer, ai_answer,
                 question_level, is_generated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, true)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let question = sqlx::query_as::<_, Question>(&query)
                .bind(book_id)
                .bind(chapter_id)
                .bind(&draft.question_text)
                .bind(&draft.options)
                .bind(&draft.correct_answer)
                .bind(&draft.ai_answer)
                .bind(&draft.question_level)
                .fetch_one(&mut *tx)
                .await?;
            created.push(question);
        }
        tx.commit().await?;

        Ok(created)
    }

    /// Find a question by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all questions in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions ORDER BY id");
        sqlx::query_as::<_, Question>(&query).fetch_all(pool).await
    }

    /// List questions belonging to a book, in creation order.
    pub async fn list_by_book(pool: &PgPool, book_id: DbId) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE book_id = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(book_id)
            .fetch_all(pool)
            .await
    }

    /// List questions attached to a chapter id, in creation order.
    pub async fn list_by_chapter(
        pool: &PgPool,
        chapter_id: &str,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE chapter_id = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(chapter_id)
            .fetch_all(pool)
            .await
    }

    /// List questions with the given difficulty, in creation order.
    pub async fn list_by_level(pool: &PgPool, level: &str) -> Result<Vec<Question>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM questions WHERE question_level = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(level)
            .fetch_all(pool)
            .await
    }

    /// Update a question. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                chapter_id = COALESCE($2, chapter_id),
                question_text = COALESCE($3, question_text),
                options = COALESCE($4, options),
                correct_answer = COALESCE($5, correct_answer),
                ai_answer = COALESCE($6, ai_answer),
                question_level = COALESCE($7, question_level)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.chapter_id)
            .bind(&input.question_text)
            .bind(&input.options)
            .bind(&input.correct_answer)
            .bind(&input.ai_answer)
            .bind(&input.question_level)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
