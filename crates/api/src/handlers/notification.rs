//! Handlers for the `/notifications` resource.
//!
//! All endpoints act on the authenticated user's own notifications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use bookmyshoot_core::types::DbId;
use bookmyshoot_db::models::notification::NotificationListQuery;
use bookmyshoot_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NotificationListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        params.unread_only,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse {
        data: notifications,
    }))
}

/// POST /api/v1/notifications/{id}/read
///
/// 204 on success; 404 if the notification is not the caller's or is
/// already read.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "marked_read": count }),
    }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: serde_json::json!({ "count": count }),
    }))
}
