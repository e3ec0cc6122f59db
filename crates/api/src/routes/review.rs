//! Route definitions for the `/reviews` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// POST   /        -> create_review (auth required)
/// GET    /{id}    -> get_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(review::create_review))
        .route("/{id}", get(review::get_review))
}
