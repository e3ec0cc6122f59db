//! Notification entity models and DTOs.

use bookmyshoot_core::types::{DbId, Timestamp};
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
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<DbId>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    pub notification_type: String,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<DbId>,
}

/// Query parameters for `GET /api/v1/notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
