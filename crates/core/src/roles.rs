//! Well-known role name constants.
//!
//! These must match the `ck_users_role` constraint in the `users` migration.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AUTHOR: &str = "author";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_TEACHER, ROLE_ADMIN, ROLE_AUTHOR];

/// Roles allowed to create and edit books and questions.
pub const CONTENT_ROLES: &[&str] = &[ROLE_AUTHOR, ROLE_TEACHER, ROLE_ADMIN];

/// Roles allowed to send notifications to other users.
pub const STAFF_ROLES: &[&str] = &[ROLE_TEACHER, ROLE_ADMIN];

/// Validate that `role` is one of [`VALID_ROLES`].
pub fn validate_role(role: &str) -> Result<(), crate::error::CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(crate::error::CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}
