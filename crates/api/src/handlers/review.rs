//! Handlers for the `/reviews` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bookmyshoot_core::types::DbId;
use bookmyshoot_db::models::review::CreateReview;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::review as service;
use crate::state::AppState;

/// POST /api/v1/reviews
///
/// The reviewer is the authenticated user; only the customer of a completed
/// booking may review its photographer, once.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateReview>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let review =
        service::create_review(&state.pool, &state.event_bus, &auth.actor(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: review })))
}

/// GET /api/v1/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let review = service::get_review(&state.pool, id).await?;
    Ok(Json(DataResponse { data: review }))
}
