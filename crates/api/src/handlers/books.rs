//! Handlers for the `/books` resource and its embedded chapters.
//!
//! Reads are open to any signed-in user (and `/books/public` to everyone).
//! Mutations require a content role, and only the book's author or an admin
//! may change an existing book.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use lectern_core::chapters::{self, ChapterPatch, NewChapter};
use lectern_core::error::CoreError;
use lectern_core::notifications;
use lectern_core::types::DbId;
use lectern_db::models::book::{Book, ChapterChange, CreateBook, UpdateBook};
use lectern_db::repositories::{BookRepo, NotificationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireContentRole;
use crate::state::AppState;

fn book_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Book", id))
}

/// Load a book and check that `user` may modify it.
async fn load_editable_book(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Book> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    if !user.is_admin() && book.author_id != Some(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the book's author or an admin can modify it".into(),
        )));
    }
    Ok(book)
}

/// Tell every other active user that `book` is available.
async fn announce(state: &AppState, book: &Book, author_id: DbId) -> AppResult<()> {
    let template = notifications::new_book(&book.name);
    let sent = NotificationRepo::broadcast(&state.pool, &template, author_id).await?;
    tracing::info!(book_id = book.id, recipients = sent, "Book published");
    Ok(())
}

/// Map a chapter edit outcome to the saved book or an error.
fn applied_book<T>(book_id: DbId, change: ChapterChange<T>) -> AppResult<Book> {
    match change {
        ChapterChange::Applied { book, .. } => Ok(book),
        ChapterChange::BookNotFound => Err(book_not_found(book_id)),
        ChapterChange::Rejected(err) => Err(AppError::Core(err)),
    }
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }

    let book = BookRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(book_id = book.id, author_id = user.user_id, "Book created");

    if book.is_public {
        announce(&state, &book, user.user_id).await?;
    }
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/v1/books
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/public
pub async fn list_public(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list_public(&state.pool).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/mine
pub async fn list_mine(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list_by_author(&state.pool, auth.user_id).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list_by_category(&state.pool, &category).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/author/{author_id}
pub async fn list_by_author(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(author_id): Path<DbId>,
) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list_by_author(&state.pool, author_id).await?;
    Ok(Json(books))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Book>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    Ok(Json(book))
}

/// PATCH /api/v1/books/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    load_editable_book(&state, &user, id).await?;
    if matches!(input.name.as_deref(), Some(name) if name.trim().is_empty()) {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }

    let book = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    Ok(Json(book))
}

/// PATCH /api/v1/books/{id}/toggle-public
pub async fn toggle_public(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path(id): Path<DbId>,
) -> AppResult<Json<Book>> {
    load_editable_book(&state, &user, id).await?;

    let book = BookRepo::toggle_public(&state.pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    if book.is_public {
        announce(&state, &book, user.user_id).await?;
    }
    Ok(Json(book))
}

/// DELETE /api/v1/books/{id}
///
/// Questions and history records of the book are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_editable_book(&state, &user, id).await?;

    if BookRepo::delete(&state.pool, id).await? {
        tracing::info!(book_id = id, user_id = user.user_id, "Book deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(book_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

/// POST /api/v1/books/{id}/chapters
pub async fn add_chapter(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path(id): Path<DbId>,
    Json(input): Json<NewChapter>,
) -> AppResult<(StatusCode, Json<Book>)> {
    load_editable_book(&state, &user, id).await?;

    let change = BookRepo::modify_chapters(&state.pool, id, |list| {
        chapters::add_chapter(list, input, Utc::now())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(applied_book(id, change)?)))
}

/// PATCH /api/v1/books/{id}/chapters/{chapter_id}
pub async fn update_chapter(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path((id, chapter_id)): Path<(DbId, String)>,
    Json(patch): Json<ChapterPatch>,
) -> AppResult<Json<Book>> {
    load_editable_book(&state, &user, id).await?;

    let change = BookRepo::modify_chapters(&state.pool, id, |list| {
        chapters::update_chapter(list, &chapter_id, patch)
    })
    .await?;
    Ok(Json(applied_book(id, change)?))
}

/// DELETE /api/v1/books/{id}/chapters/{chapter_id}
pub async fn delete_chapter(
    State(state): State<AppState>,
    RequireContentRole(user): RequireContentRole,
    Path((id, chapter_id)): Path<(DbId, String)>,
) -> AppResult<Json<Book>> {
    load_editable_book(&state, &user, id).await?;

    let change = BookRepo::modify_chapters(&state.pool, id, |list| {
        chapters::delete_chapter(list, &chapter_id)
    })
    .await?;
    Ok(Json(applied_book(id, change)?))
}
