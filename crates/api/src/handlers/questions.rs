//! Handlers for the `/questions` resource, including generation from a chapter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::chapters::find_chapter;
use lectern_core::error::CoreError;
use lectern_core::notifications;
use lectern_core::questions::{validate_generate_count, validate_level, ChapterSource};
use lectern_core::types::DbId;
use lectern_db::models::notification::CreateNotification;
use lectern_db::models::question::{CreateQuestion, Question, UpdateQuestion};
use lectern_db::repositories::{BookRepo, NotificationRepo, QuestionRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireContentRole;
use crate::query::CountParams;
use crate::state::AppState;

/// Request body for `POST /questions/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub book_id: DbId,
    pub chapter_id: String,
}

fn question_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Question", id))
}

fn validate_content(question_text: Option<&str>, options: Option<&[String]>) -> AppResult<()> {
    if matches!(question_text, Some(text) if text.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "question_text must not be empty".into(),
        )));
    }
    if matches!(options, Some(opts) if opts.is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "options must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/questions
pub async fn create(
    State(state): State<AppState>,
    RequireContentRole(_user): RequireContentRole,
    Json(input): Json<CreateQuestion>,
) -> AppResult<(StatusCode, Json<Question>)> {
    validate_content(Some(&input.question_text), Some(&input.options))?;
    if let Some(level) = &input.question_level {
        validate_level(level)?;
    }
    if BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("Book", input.book_id)));
    }

    let question = QuestionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(question)))
}

/// POST /api/v1/questions/generate?count=
///
/// Generate `count` questions (default 5, at most 50) from one chapter and
/// persist them together.
pub async fn generate(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Query(params): Query<CountParams>,
    Json(input): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<Vec<Question>>)> {
    let count = validate_generate_count(params.count)?;

    let book = BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Book", input.book_id)))?;
    let chapter = find_chapter(&book.chapters.0, &input.chapter_id)
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chapter", &input.chapter_id)))?;

    let drafts = state
        .generator
        .generate(
            ChapterSource {
                book_id: book.id,
                book_name: &book.name,
                chapter,
            },
            count,
        )
        .await?;

    let questions =
        QuestionRepo::create_generated(&state.pool, book.id, &chapter.id, &drafts).await?;

    tracing::info!(
        book_id = book.id,
        chapter_id = %chapter.id,
        count = questions.len(),
        generator = state.generator.name(),
        "Questions generated",
    );

    let template = notifications::questions_generated(&book.name, questions.len());
    NotificationRepo::create(
        &state.pool,
        &CreateNotification::from_template(user.user_id, template),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(questions)))
}

/// GET /api/v1/questions
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Question>>> {
    let questions = QuestionRepo::list(&state.pool).await?;
    Ok(Json(questions))
}

/// GET /api/v1/questions/book/{book_id}
pub async fn list_by_book(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(book_id): Path<DbId>,
) -> AppResult<Json<Vec<Question>>> {
    let questions = QuestionRepo::list_by_book(&state.pool, book_id).await?;
    Ok(Json(questions))
}

/// GET /api/v1/questions/chapter/{chapter_id}
pub async fn list_by_chapter(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(chapter_id): Path<String>,
) -> AppResult<Json<Vec<Question>>> {
    let questions = QuestionRepo::list_by_chapter(&state.pool, &chapter_id).await?;
    Ok(Json(questions))
}

/// GET /api/v1/questions/level/{level}
pub async fn list_by_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(level): Path<String>,
) -> AppResult<Json<Vec<Question>>> {
    validate_level(&level)?;
    let questions = QuestionRepo::list_by_level(&state.pool, &level).await?;
    Ok(Json(questions))
}

/// GET /api/v1/questions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Question>> {
    let question = QuestionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| question_not_found(id))?;
    Ok(Json(question))
}

/// PATCH /api/v1/questions/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireContentRole(_user): RequireContentRole,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuestion>,
) -> AppResult<Json<Question>> {
    validate_content(input.question_text.as_deref(), input.options.as_deref())?;
    if let Some(level) = &input.question_level {
        validate_level(level)?;
    }

    let question = QuestionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| question_not_found(id))?;
    Ok(Json(question))
}

/// DELETE /api/v1/questions/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireContentRole(_user): RequireContentRole,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if QuestionRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(question_not_found(id))
    }
}
