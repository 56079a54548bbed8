//! Route definitions for the `/books` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Routes mounted at `/books`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /public                        -> list_public (no auth)
/// GET    /mine                          -> list_mine
/// GET    /category/{category}           -> list_by_category
/// GET    /author/{author_id}            -> list_by_author
/// GET    /{id}                          -> get_by_id
/// PATCH  /{id}                          -> update
/// DELETE /{id}                          -> delete
/// PATCH  /{id}/toggle-public            -> toggle_public
/// POST   /{id}/chapters                 -> add_chapter
/// PATCH  /{id}/chapters/{chapter_id}    -> update_chapter
/// DELETE /{id}/chapters/{chapter_id}    -> delete_chapter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list).post(books::create))
        .route("/public", get(books::list_public))
        .route("/mine", get(books::list_mine))
        .route("/category/{category}", get(books::list_by_category))
        .route("/author/{author_id}", get(books::list_by_author))
        .route(
            "/{id}",
            get(books::get_by_id)
                .patch(books::update)
                .delete(books::delete),
        )
        .route("/{id}/toggle-public", patch(books::toggle_public))
        .route("/{id}/chapters", post(books::add_chapter))
        .route(
            "/{id}/chapters/{chapter_id}",
            patch(books::update_chapter).delete(books::delete_chapter),
        )
}
