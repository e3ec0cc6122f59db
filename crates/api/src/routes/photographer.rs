//! Route definitions for photographer-scoped reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::photographer;
use crate::state::AppState;

/// Routes mounted at `/photographers`.
///
/// ```text
/// GET    /{id}/availability     -> availability (auth required)
/// GET    /{id}/booking-stats    -> booking_stats (admin or self)
/// GET    /{id}/reviews          -> list_reviews
/// GET    /{id}/review-stats     -> review_stats
/// GET    /{id}/rating           -> rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/availability", get(photographer::availability))
        .route("/{id}/booking-stats", get(photographer::booking_stats))
        .route("/{id}/reviews", get(photographer::list_reviews))
        .route("/{id}/review-stats", get(photographer::review_stats))
        .route("/{id}/rating", get(photographer::rating))
}
