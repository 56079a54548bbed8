//! Route definitions for the `/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                         -> list (admin)
/// GET    /profile                  -> profile
/// GET    /{id}                     -> get_by_id
/// PATCH  /{id}                     -> update (self or admin)
/// DELETE /{id}                     -> deactivate (admin)
/// PUT    /{id}/role                -> set_role (admin)
/// POST   /{id}/books/{book_id}     -> add_book (self or admin)
/// DELETE /{id}/books/{book_id}     -> remove_book (self or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/profile", get(users::profile))
        .route(
            "/{id}",
            get(users::get_by_id)
                .patch(users::update)
                .delete(users::deactivate),
        )
        .route("/{id}/role", put(users::set_role))
        .route(
            "/{id}/books/{book_id}",
            post(users::add_book).delete(users::remove_book),
        )
}
