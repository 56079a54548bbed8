//! Shared query parameter types for API handlers.

use lectern_core::types::DbId;
use serde::Deserialize;

/// `?book_id=` filter for statistics.
#[derive(Debug, Deserialize)]
pub struct BookFilterParams {
    pub book_id: Option<DbId>,
}

/// `?count=` for question generation. Bounds are checked by the handler.
#[derive(Debug, Deserialize)]
pub struct CountParams {
    pub count: Option<i64>,
}
