//! Handlers for the `/history` resource: answer submission, statistics and
//! achievements.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lectern_core::achievements::{evaluate, Achievement};
use lectern_core::error::CoreError;
use lectern_core::progress::{level_for_total, summarize, xp_for_level, StatisticsSummary};
use lectern_core::types::DbId;
use lectern_db::models::history::{HistoryRecord, RecordAnswer};
use lectern_db::repositories::{BookRepo, HistoryRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireContentRole};
use crate::query::BookFilterParams;
use crate::state::AppState;

/// Response body for `GET /history/statistics`.
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    #[serde(flatten)]
    pub summary: StatisticsSummary,
    pub records: Vec<HistoryRecord>,
}

/// Response body for `GET /history/achievements`.
#[derive(Debug, Serialize)]
pub struct AchievementsResponse {
    pub level: i32,
    pub total_answers: i64,
    /// Total answers at which the next level is reached.
    pub next_level_at: i64,
    pub achievements: Vec<Achievement>,
}

fn history_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("History", id))
}

/// POST /api/v1/history/answer
///
/// Record one answer for the caller. Creates the (user, book) record on the
/// first answer; repeated answers to the same question are counted again.
/// Crossing a level threshold raises the stored level and notifies the user
/// in the same transaction.
pub async fn record_answer(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RecordAnswer>,
) -> AppResult<Json<HistoryRecord>> {
    if BookRepo::find_by_id(&state.pool, input.book_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found("Book", input.book_id)));
    }

    let outcome = HistoryRepo::record_answer(&state.pool, auth.user_id, &input).await?;
    tracing::debug!(
        user_id = auth.user_id,
        book_id = input.book_id,
        question_id = input.question_id,
        is_correct = input.is_correct,
        total = outcome.record.total_questions,
        new_level = ?outcome.new_level,
        "Answer recorded",
    );
    Ok(Json(outcome.record))
}

/// GET /api/v1/history
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    let records = HistoryRepo::list(&state.pool).await?;
    Ok(Json(records))
}

/// GET /api/v1/history/my
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    let records = HistoryRepo::list_for_user(&state.pool, auth.user_id, None).await?;
    Ok(Json(records))
}

/// GET /api/v1/history/statistics?book_id=
pub async fn statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<BookFilterParams>,
) -> AppResult<Json<StatisticsResponse>> {
    let records = HistoryRepo::list_for_user(&state.pool, auth.user_id, params.book_id).await?;
    let summary = summarize(records.iter().map(HistoryRecord::totals));
    Ok(Json(StatisticsResponse { summary, records }))
}

/// GET /api/v1/history/achievements
pub async fn achievements(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<AchievementsResponse>> {
    let records = HistoryRepo::list_for_user(&state.pool, auth.user_id, None).await?;
    let summary = summarize(records.iter().map(HistoryRecord::totals));
    let level = level_for_total(summary.total_questions);

    Ok(Json(AchievementsResponse {
        level,
        total_answers: summary.total_questions,
        next_level_at: xp_for_level(level),
        achievements: evaluate(&summary),
    }))
}

/// GET /api/v1/history/user/{user_id}
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    auth.ensure_self_or_admin(user_id)?;
    let records = HistoryRepo::list_for_user(&state.pool, user_id, None).await?;
    Ok(Json(records))
}

/// GET /api/v1/history/book/{book_id}
pub async fn list_for_book(
    State(state): State<AppState>,
    RequireContentRole(_user): RequireContentRole,
    Path(book_id): Path<DbId>,
) -> AppResult<Json<Vec<HistoryRecord>>> {
    let records = HistoryRepo::list_for_book(&state.pool, book_id).await?;
    Ok(Json(records))
}

/// GET /api/v1/history/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<HistoryRecord>> {
    let record = HistoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| history_not_found(id))?;
    // Hide other users' records rather than confirming they exist.
    if record.user_id != auth.user_id && !auth.is_admin() {
        return Err(history_not_found(id));
    }
    Ok(Json(record))
}

/// DELETE /api/v1/history/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if HistoryRepo::delete(&state.pool, id).await? {
        tracing::info!(history_id = id, admin_id = admin.user_id, "History record deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(history_not_found(id))
    }
}
