use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the `SELECT 1` check, absent when it failed.
    pub db_latency_ms: Option<u64>,
    /// Open and idle connections in the pool.
    pub pool_size: u32,
    pub pool_idle: usize,
    /// Backend behind `POST /questions/generate`.
    pub question_generator: &'static str,
}

/// GET /health. Answers 503 when the database check fails so load balancers
/// take the instance out of rotation.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let started = Instant::now();
    let db_result = lectern_db::health_check(&state.pool).await;
    let db_latency_ms = db_result
        .as_ref()
        .ok()
        .map(|_| started.elapsed().as_millis() as u64);

    if let Err(e) = &db_result {
        tracing::warn!(error = %e, "Health check could not reach the database");
    }

    let db_healthy = db_result.is_ok();
    let (code, status) = if db_healthy {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        db_latency_ms,
        pool_size: state.pool.size(),
        pool_idle: state.pool.num_idle(),
        question_generator: state.generator.name(),
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
