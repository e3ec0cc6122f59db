//! Repository for the `photographer_profiles` table.
//!
//! `rating_avg` and `total_reviews` are written only by
//! [`PhotographerRepo::record_rating`].

use bookmyshoot_core::types::DbId;
use sqlx::PgPool;

use crate::models::photographer::{
    CreatePhotographerProfile, PhotographerProfile, PhotographerRating,
};

/// Column list for `photographer_profiles` queries.
const COLUMNS: &str = "\
    id, user_id, business_name, city, rating_avg, total_reviews, created_at, updated_at";

/// Provides persistence for photographer profiles and their rating aggregate.
pub struct PhotographerRepo;

impl PhotographerRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePhotographerProfile,
    ) -> Result<PhotographerProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO photographer_profiles (user_id, business_name, city) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotographerProfile>(&query)
            .bind(input.user_id)
            .bind(&input.business_name)
            .bind(&input.city)
            .fetch_one(pool)
            .await
    }

    /// Whether `user_id` is a bookable photographer: an active photographer
    /// account with a profile.
    pub async fn exists(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM photographer_profiles p \
                JOIN users u ON u.id = p.user_id \
                WHERE p.user_id = $1 AND u.role = 'photographer' AND u.is_active \
             )",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Read the cached rating aggregate.
    pub async fn get_rating(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<PhotographerRating>, sqlx::Error> {
        sqlx::query_as::<_, PhotographerRating>(
            "SELECT rating_avg, total_reviews FROM photographer_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Fold one rating into the aggregate in a single statement.
    ///
    /// The row lock taken by the `UPDATE` serializes concurrent folds, so no
    /// rating is lost. The average is rounded to two decimals after each fold,
    /// matching `bookmyshoot_core::rating::fold_rating`.
    pub async fn record_rating(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        rating: i16,
    ) -> Result<Option<PhotographerRating>, sqlx::Error> {
        sqlx::query_as::<_, PhotographerRating>(
            "UPDATE photographer_profiles SET \
                rating_avg = ROUND( \
                    ((rating_avg * total_reviews + $2) / (total_reviews + 1))::NUMERIC, 2 \
                )::DOUBLE PRECISION, \
                total_reviews = total_reviews + 1 \
             WHERE user_id = $1 \
             RETURNING rating_avg, total_reviews",
        )
        .bind(user_id)
        .bind(f64::from(rating))
        .fetch_optional(&mut **tx)
        .await
    }
}
