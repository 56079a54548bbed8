//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::roles::validate_role;
use lectern_core::types::DbId;
use lectern_db::models::user::{UpdateUser, UserResponse};
use lectern_db::repositories::{BookRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `PUT /users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("User", id))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| user_not_found(auth.user_id))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/{id}
///
/// Users may edit their own profile; admins may edit anyone's.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    auth.ensure_self_or_admin(id)?;
    if matches!(input.username.as_deref(), Some("")) {
        return Err(AppError::Core(CoreError::Validation(
            "username must not be empty".into(),
        )));
    }

    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/{id}/role
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<UserResponse>> {
    validate_role(&input.role)?;

    let user = UserRepo::set_role(&state.pool, id, &input.role)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    tracing::info!(user_id = id, role = %input.role, admin_id = admin.user_id, "User role changed");
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
///
/// Deactivates the account. Users are never hard-deleted.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(user_not_found(id));
    }
    UserRepo::deactivate(&state.pool, id).await?;

    tracing::info!(user_id = id, admin_id = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/books/{book_id}
///
/// Adding a book already in the list is a no-op.
pub async fn add_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, book_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<UserResponse>> {
    auth.ensure_self_or_admin(id)?;
    if BookRepo::find_by_id(&state.pool, book_id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("Book", book_id)));
    }

    let user = UserRepo::add_book(&state.pool, id, book_id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}/books/{book_id}
pub async fn remove_book(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, book_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<UserResponse>> {
    auth.ensure_self_or_admin(id)?;

    let user = UserRepo::remove_book(&state.pool, id, book_id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}
