//! Route definitions for the `/history` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// Routes mounted at `/history`.
///
/// ```text
/// GET    /                    -> list (admin)
/// GET    /my                  -> list_mine
/// GET    /statistics          -> statistics (?book_id=)
/// GET    /achievements        -> achievements
/// GET    /user/{user_id}      -> list_for_user (self or admin)
/// GET    /book/{book_id}      -> list_for_book (content roles)
/// POST   /answer              -> record_answer
/// GET    /{id}                -> get_by_id (owner or admin)
/// DELETE /{id}                -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list))
        .route("/my", get(history::list_mine))
        .route("/statistics", get(history::statistics))
        .route("/achievements", get(history::achievements))
        .route("/user/{user_id}", get(history::list_for_user))
        .route("/book/{book_id}", get(history::list_for_book))
        .route("/answer", post(history::record_answer))
        .route("/{id}", get(history::get_by_id).delete(history::delete))
}
