//! Route definitions for the `/notifications` resource.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (teacher or admin)
/// GET    /unread         -> list_unread
/// GET    /unread-count   -> unread_count
/// PATCH  /read-all       -> mark_all_read
/// DELETE /clear-all      -> clear_all
/// PATCH  /{id}/read      -> mark_read
/// GET    /{id}           -> get_by_id
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list).post(notifications::create))
        .route("/unread", get(notifications::list_unread))
        .route("/unread-count", get(notifications::unread_count))
        .route("/read-all", patch(notifications::mark_all_read))
        .route("/clear-all", delete(notifications::clear_all))
        .route("/{id}/read", patch(notifications::mark_read))
        .route(
            "/{id}",
            get(notifications::get_by_id).delete(notifications::delete),
        )
}
