pub mod auth;
pub mod books;
pub mod history;
pub mod notifications;
pub mod questions;
pub mod users;
