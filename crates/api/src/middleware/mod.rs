//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireContentRole`] -- Requires `author`, `teacher` or `admin`.
//! - [`rbac::RequireStaff`] -- Requires `teacher` or `admin`.

pub mod auth;
pub mod rbac;
