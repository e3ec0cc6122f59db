pub mod booking;
pub mod health;
pub mod notification;
pub mod photographer;
pub mod review;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bookings                                   list, create (customer only)
/// /bookings/upcoming                          confirmed or in-progress, not yet started
/// /bookings/{id}                              get, update details (PUT)
/// /bookings/{id}/status                       status transition (PATCH)
///
/// /reviews                                    create (auth required)
/// /reviews/{id}                               get (public)
///
/// /photographers/{id}/availability            slot availability (auth required)
/// /photographers/{id}/booking-stats           booking statistics (admin or self)
/// /photographers/{id}/reviews                 list reviews (public)
/// /photographers/{id}/review-stats            rating distribution (public)
/// /photographers/{id}/rating                  rating aggregate (public)
///
/// /notifications                              list (auth required)
/// /notifications/unread-count                 unread count
/// /notifications/read-all                     mark all read (POST)
/// /notifications/{id}/read                    mark one read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/bookings", booking::router())
        .nest("/reviews", review::router())
        .nest("/photographers", photographer::router())
        .nest("/notifications", notification::router())
}
