//! Notification type tags and message templates for platform events.

use serde::Serialize;

use crate::error::CoreError;

pub const TYPE_INFO: &str = "info";
pub const TYPE_SUCCESS: &str = "success";
pub const TYPE_WARNING: &str = "warning";
pub const TYPE_ERROR: &str = "error";

/// All valid notification type tags.
pub const VALID_TYPES: &[&str] = &[TYPE_INFO, TYPE_SUCCESS, TYPE_WARNING, TYPE_ERROR];

/// Validate that `notification_type` is one of [`VALID_TYPES`].
pub fn validate_type(notification_type: &str) -> Result<(), CoreError> {
    if VALID_TYPES.contains(&notification_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid notification type '{notification_type}'. Must be one of: {VALID_TYPES:?}"
        )))
    }
}

/// Title, body, type and deep link of a notification produced by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationTemplate {
    pub title: String,
    pub message: String,
    pub notification_type: &'static str,
    pub link: Option<String>,
}

/// A book became available for study.
pub fn new_book(book_name: &str) -> NotificationTemplate {
    NotificationTemplate {
        title: "New book available!".to_string(),
        message: format!("The book \"{book_name}\" is now available for study."),
        notification_type: TYPE_INFO,
        link: Some("/books".to_string()),
    }
}

/// The user reached a new level.
pub fn level_up(new_level: i32) -> NotificationTemplate {
    NotificationTemplate {
        title: "Congratulations!".to_string(),
        message: format!("You reached level {new_level}!"),
        notification_type: TYPE_SUCCESS,
        link: Some("/profile".to_string()),
    }
}

/// Questions were generated for a book.
pub fn questions_generated(book_name: &str, count: usize) -> NotificationTemplate {
    NotificationTemplate {
        title: "Questions generated".to_string(),
        message: format!("{count} questions were generated for the book \"{book_name}\"."),
        notification_type: TYPE_SUCCESS,
        link: None,
    }
}
