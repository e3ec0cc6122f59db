//! Repository for the `reviews` table.

use std::collections::BTreeMap;

use bookmyshoot_core::rating::{round1, RATING_MAX, RATING_MIN};
use bookmyshoot_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::review::{CreateReview, RatingCountRow, Review, ReviewStats};

/// Column list for `reviews` queries.
const COLUMNS: &str = "\
    id, photographer_id, reviewer_id, booking_id, rating, comment, media_urls, \
    created_at, updated_at";

/// Provides persistence for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review inside an open transaction.
    ///
    /// Fails with a `23505` error on `uq_reviews_photographer_reviewer` if the
    /// reviewer already reviewed this photographer.
    pub async fn create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reviewer_id: DbId,
        input: &CreateReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews \
                (photographer_id, reviewer_id, booking_id, rating, comment, media_urls) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.photographer_id)
            .bind(reviewer_id)
            .bind(input.booking_id)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(Json(&input.media_urls))
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `reviewer_id` has already reviewed `photographer_id`.
    pub async fn exists_for_pair(
        pool: &PgPool,
        photographer_id: DbId,
        reviewer_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM reviews WHERE photographer_id = $1 AND reviewer_id = $2 \
             )",
        )
        .bind(photographer_id)
        .bind(reviewer_id)
        .fetch_one(pool)
        .await
    }

    /// Reviews for a photographer, newest first, optionally with a rating floor.
    pub async fn list_for_photographer(
        pool: &PgPool,
        photographer_id: DbId,
        min_rating: Option<i16>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews \
             WHERE photographer_id = $1 \
               AND ($2::SMALLINT IS NULL OR rating >= $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(photographer_id)
            .bind(min_rating)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Distribution and exact mean of a photographer's ratings.
    pub async fn stats_for_photographer(
        pool: &PgPool,
        photographer_id: DbId,
    ) -> Result<ReviewStats, sqlx::Error> {
        let rows = sqlx::query_as::<_, RatingCountRow>(
            "SELECT rating, COUNT(*) AS count FROM reviews \
             WHERE photographer_id = $1 \
             GROUP BY rating",
        )
        .bind(photographer_id)
        .fetch_all(pool)
        .await?;

        let mut rating_distribution: BTreeMap<i16, i64> =
            (RATING_MIN..=RATING_MAX).map(|r| (r, 0)).collect();
        let mut total_reviews = 0;
        let mut sum = 0i64;
        for row in rows {
            rating_distribution.insert(row.rating, row.count);
            total_reviews += row.count;
            sum += i64::from(row.rating) * row.count;
        }

        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            round1(sum as f64 / total_reviews as f64)
        };

        Ok(ReviewStats {
            average_rating,
            total_reviews,
            rating_distribution,
        })
    }
}
