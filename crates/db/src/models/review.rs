//! Review entity models and DTOs.

use std::collections::BTreeMap;

use bookmyshoot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub photographer_id: DbId,
    pub reviewer_id: DbId,
    pub booking_id: DbId,
    pub rating: i16,
    pub comment: Option<String>,
    pub media_urls: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a review. The reviewer is the authenticated actor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReview {
    pub photographer_id: DbId,
    pub booking_id: DbId,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub media_urls: Vec<String>,
}

/// Query parameters for `GET /api/v1/photographers/{id}/reviews`.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    /// Only reviews with `rating >= min_rating`.
    pub min_rating: Option<i16>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Per-rating count row.
#[derive(Debug, Clone, FromRow)]
pub struct RatingCountRow {
    pub rating: i16,
    pub count: i64,
}

/// Review summary for one photographer, recomputed from the review rows.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewStats {
    /// Exact mean rounded to one decimal; 0 when there are no reviews.
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Count for every rating 1..=5, including zeros.
    pub rating_distribution: BTreeMap<i16, i64>,
}
