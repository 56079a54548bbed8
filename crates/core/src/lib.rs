//! Domain logic for the Lectern learning platform.
//!
//! This crate has no database or HTTP dependencies. Repositories and handlers
//! load data, call into these modules, and persist the results.

pub mod achievements;
pub mod chapters;
pub mod error;
pub mod notifications;
pub mod progress;
pub mod questions;
pub mod roles;
pub mod types;
