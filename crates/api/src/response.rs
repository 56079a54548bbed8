//! Shared response envelope types for API handlers.
//!
//! Resources are returned bare. Endpoints that only report a number use these
//! typed bodies instead of ad-hoc `serde_json::json!` values.

use serde::Serialize;

/// `{ "count": n }` body for counting endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `{ "affected": n }` body for bulk updates and deletes.
#[derive(Debug, Serialize)]
pub struct AffectedResponse {
    pub affected: u64,
}
