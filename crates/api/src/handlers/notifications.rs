//! Handlers for the `/notifications` resource.
//!
//! Everything except `create` acts on the caller's own notifications; another
//! user's notification id is reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::error::CoreError;
use lectern_core::notifications::validate_type;
use lectern_core::types::DbId;
use lectern_db::models::notification::{CreateNotification, Notification};
use lectern_db::repositories::{NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::{AffectedResponse, CountResponse};
use crate::state::AppState;

fn notification_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Notification", id))
}

/// POST /api/v1/notifications
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(sender): RequireStaff,
    Json(input): Json<CreateNotification>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    if input.title.trim().is_empty() || input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title and message must not be empty".into(),
        )));
    }
    if let Some(kind) = &input.notification_type {
        validate_type(kind)?;
    }
    if UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("User", input.user_id)));
    }

    let notification = NotificationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        notification_id = notification.id,
        recipient_id = input.user_id,
        sender_id = sender.user_id,
        "Notification sent",
    );
    Ok((StatusCode::CREATED, Json(notification)))
}

/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id, false).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/unread
pub async fn list_unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id, true).await?;
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CountResponse>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(CountResponse { count }))
}

/// PATCH /api/v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::mark_read(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| notification_not_found(id))?;
    Ok(Json(notification))
}

/// PATCH /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AffectedResponse>> {
    let affected = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(AffectedResponse { affected }))
}

/// GET /api/v1/notifications/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| notification_not_found(id))?;
    Ok(Json(notification))
}

/// DELETE /api/v1/notifications/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::delete(&state.pool, id, auth.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(notification_not_found(id))
    }
}

/// DELETE /api/v1/notifications/clear-all
pub async fn clear_all(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AffectedResponse>> {
    let affected = NotificationRepo::clear_all(&state.pool, auth.user_id).await?;
    Ok(Json(AffectedResponse { affected }))
}
