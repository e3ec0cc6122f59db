//! Handlers for the `/bookings` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookmyshoot_core::booking::BookingStatus;
use bookmyshoot_core::types::DbId;
use bookmyshoot_db::models::booking::{BookingListQuery, CreateBooking, UpdateBooking};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCustomer;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::services::booking as service;
use crate::state::AppState;

/// Request body for `PATCH /bookings/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    /// Target status name, e.g. `confirmed`.
    pub status: String,
    /// Stored only when the target is `cancelled`.
    #[validate(length(max = 1000))]
    pub cancellation_reason: Option<String>,
}

/// POST /api/v1/bookings
pub async fn create_booking(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    Json(input): Json<CreateBooking>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let booking =
        service::create_booking(&state.pool, &state.event_bus, &auth.actor(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/bookings
pub async fn list_bookings(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BookingListQuery>,
) -> AppResult<impl IntoResponse> {
    let bookings = service::list_bookings(&state.pool, &auth.actor(), &params).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/upcoming
pub async fn list_upcoming(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let bookings = service::upcoming_bookings(&state.pool, &auth.actor(), params.limit).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let booking = service::get_booking(&state.pool, &auth.actor(), id).await?;
    Ok(Json(DataResponse { data: booking }))
}

/// PUT /api/v1/bookings/{id}
///
/// Patch descriptive fields and the time slot. Status has its own endpoint.
pub async fn update_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBooking>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let booking =
        service::update_booking_details(&state.pool, &state.event_bus, &auth.actor(), id, &input)
            .await?;
    Ok(Json(DataResponse { data: booking }))
}

/// PATCH /api/v1/bookings/{id}/status
pub async fn update_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let target = BookingStatus::parse(&input.status)?;
    let booking = service::update_booking_status(
        &state.pool,
        &state.event_bus,
        &auth.actor(),
        id,
        target,
        input.cancellation_reason.as_deref(),
    )
    .await?;
    Ok(Json(DataResponse { data: booking }))
}
