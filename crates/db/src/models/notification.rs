//! Notification entity model and DTOs.

use lectern_core::notifications::NotificationTemplate;
use lectern_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub link: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    /// Defaults to `info` when absent.
    pub notification_type: Option<String>,
    pub link: Option<String>,
}

impl CreateNotification {
    /// Address a platform-generated template to `user_id`.
    pub fn from_template(user_id: DbId, template: NotificationTemplate) -> Self {
        Self {
            user_id,
            title: template.title,
            message: template.message,
            notification_type: Some(template.notification_type.to_string()),
            link: template.link,
        }
    }
}
