//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not
//! in the required set.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lectern_core::error::CoreError;
use lectern_core::roles::{CONTENT_ROLES, ROLE_ADMIN, STAFF_ROLES};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate and check that the caller's role is one of `allowed`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[&str],
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !allowed.contains(&user.role.as_str()) {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[ROLE_ADMIN], "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Requires a role that may author books and questions (`author`, `teacher`, `admin`).
pub struct RequireContentRole(pub AuthUser);

impl FromRequestParts<AppState> for RequireContentRole {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            CONTENT_ROLES,
            "Author, Teacher or Admin role required",
        )
        .await
        .map(RequireContentRole)
    }
}

/// Requires `teacher` or `admin`.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, STAFF_ROLES, "Teacher or Admin role required")
            .await
            .map(RequireStaff)
    }
}
