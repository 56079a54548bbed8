//! Route definitions for the `/questions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// POST   /generate?count=           -> generate
/// GET    /book/{book_id}            -> list_by_book
/// GET    /chapter/{chapter_id}      -> list_by_chapter
/// GET    /level/{level}             -> list_by_level
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(questions::list).post(questions::create))
        .route("/generate", post(questions::generate))
        .route("/book/{book_id}", get(questions::list_by_book))
        .route("/chapter/{chapter_id}", get(questions::list_by_chapter))
        .route("/level/{level}", get(questions::list_by_level))
        .route(
            "/{id}",
            get(questions::get_by_id)
                .patch(questions::update)
                .delete(questions::delete),
        )
}
