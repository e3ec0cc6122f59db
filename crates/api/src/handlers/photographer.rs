//! Handlers mounted under `/photographers/{id}`: availability, statistics,
//! reviews, and the rating aggregate.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use bookmyshoot_core::types::{DbId, Timestamp};
use bookmyshoot_db::models::review::ReviewListQuery;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::{booking as booking_service, review as review_service};
use crate::state::AppState;

/// Query parameters for `GET /photographers/{id}/availability`.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Ignore this booking, e.g. when checking a reschedule.
    pub exclude_booking_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub photographer_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub available: bool,
}

/// GET /api/v1/photographers/{id}/availability
pub async fn availability(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(photographer_id): Path<DbId>,
    Query(params): Query<AvailabilityQuery>,
) -> AppResult<impl IntoResponse> {
    let available = booking_service::check_availability(
        &state.pool,
        photographer_id,
        params.start_time,
        params.end_time,
        params.exclude_booking_id,
    )
    .await?;

    Ok(Json(DataResponse {
        data: AvailabilityResponse {
            photographer_id,
            start_time: params.start_time,
            end_time: params.end_time,
            available,
        },
    }))
}

/// GET /api/v1/photographers/{id}/booking-stats
pub async fn booking_stats(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(photographer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stats =
        booking_service::booking_stats(&state.pool, &auth.actor(), photographer_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/photographers/{id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(photographer_id): Path<DbId>,
    Query(params): Query<ReviewListQuery>,
) -> AppResult<impl IntoResponse> {
    let reviews =
        review_service::list_for_photographer(&state.pool, photographer_id, &params).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/photographers/{id}/review-stats
pub async fn review_stats(
    State(state): State<AppState>,
    Path(photographer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let stats = review_service::review_stats(&state.pool, photographer_id).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/photographers/{id}/rating
pub async fn rating(
    State(state): State<AppState>,
    Path(photographer_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rating = review_service::photographer_rating(&state.pool, photographer_id).await?;
    Ok(Json(DataResponse { data: rating }))
}
