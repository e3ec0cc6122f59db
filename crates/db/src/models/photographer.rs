//! Photographer profile models.

use bookmyshoot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `photographer_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotographerProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub business_name: Option<String>,
    pub city: Option<String>,
    pub rating_avg: f64,
    pub total_reviews: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a photographer profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhotographerProfile {
    pub user_id: DbId,
    pub business_name: Option<String>,
    pub city: Option<String>,
}

/// The cached rating aggregate.
#[derive(Debug, Clone, Copy, PartialEq, FromRow, Serialize)]
pub struct PhotographerRating {
    pub rating_avg: f64,
    pub total_reviews: i32,
}
