//! Route definitions for the `/bookings` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /                 -> list_bookings
/// POST   /                 -> create_booking
/// GET    /upcoming         -> list_upcoming
/// GET    /{id}             -> get_booking
/// PUT    /{id}             -> update_booking
/// PATCH  /{id}/status      -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(booking::list_bookings).post(booking::create_booking),
        )
        .route("/upcoming", get(booking::list_upcoming))
        .route(
            "/{id}",
            get(booking::get_booking).put(booking::update_booking),
        )
        .route("/{id}/status", patch(booking::update_status))
}
