pub mod auth;
pub mod books;
pub mod health;
pub mod history;
pub mod notifications;
pub mod questions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/...           register, login, refresh, logout
/// /users/...          profiles, roles, per-user book lists
/// /books/...          catalogue and embedded chapters
/// /questions/...      question bank and generation
/// /history/...        answers, statistics, achievements
/// /notifications/...  per-user inbox
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/books", books::router())
        .nest("/questions", questions::router())
        .nest("/history", history::router())
        .nest("/notifications", notifications::router())
}
