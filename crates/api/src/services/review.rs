//! Review creation and the rating aggregate it feeds.

use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use bookmyshoot_core::rating::validate_rating;
use bookmyshoot_core::review::{
    check_review_preconditions, validate_comment, validate_media_urls, ReviewedBooking,
};
use bookmyshoot_core::roles::Actor;
use bookmyshoot_core::types::DbId;
use bookmyshoot_db::models::photographer::PhotographerRating;
use bookmyshoot_db::models::review::{CreateReview, Review, ReviewListQuery, ReviewStats};
use bookmyshoot_db::repositories::{BookingRepo, PhotographerRepo, ReviewRepo};
use bookmyshoot_events::{EventBus, PlatformEvent};
use sqlx::PgPool;

use crate::error::{is_constraint_violation, AppError, AppResult, PG_UNIQUE_VIOLATION};

/// One review per (photographer, reviewer).
pub const REVIEW_UNIQUE_CONSTRAINT: &str = "uq_reviews_photographer_reviewer";

/// Record a review and fold its rating into the photographer's aggregate.
///
/// The insert and the aggregate update commit together or not at all.
pub async fn create_review(
    pool: &PgPool,
    bus: &EventBus,
    actor: &Actor,
    input: &CreateReview,
) -> AppResult<Review> {
    validate_rating(input.rating)?;
    validate_comment(input.comment.as_deref())?;
    validate_media_urls(&input.media_urls)?;

    ensure_photographer(pool, input.photographer_id).await?;

    let booking = BookingRepo::find_by_id(pool, input.booking_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Booking",
            id: input.booking_id,
        })?;
    check_review_preconditions(
        actor.user_id,
        input.photographer_id,
        &ReviewedBooking {
            customer_id: booking.customer_id,
            photographer_id: booking.photographer_id,
            status: booking.status()?,
        },
    )?;

    if ReviewRepo::exists_for_pair(pool, input.photographer_id, actor.user_id).await? {
        return Err(already_reviewed());
    }

    let mut tx = pool.begin().await?;
    let review = ReviewRepo::create(&mut tx, actor.user_id, input)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e, PG_UNIQUE_VIOLATION, REVIEW_UNIQUE_CONSTRAINT) {
                already_reviewed()
            } else {
                AppError::Database(e)
            }
        })?;
    let rating = PhotographerRepo::record_rating(&mut tx, input.photographer_id, input.rating)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Photographer",
            id: input.photographer_id,
        })?;
    tx.commit().await?;

    tracing::info!(
        review_id = review.id,
        photographer_id = review.photographer_id,
        rating = review.rating,
        rating_avg = rating.rating_avg,
        total_reviews = rating.total_reviews,
        "Review created",
    );
    bus.publish(PlatformEvent::review_created(
        review.id,
        review.photographer_id,
        review.reviewer_id,
        review.rating,
    ));

    Ok(review)
}

pub async fn get_review(pool: &PgPool, id: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Review", id }))
}

/// Newest reviews first, optionally filtered to `rating >= min_rating`.
pub async fn list_for_photographer(
    pool: &PgPool,
    photographer_id: DbId,
    params: &ReviewListQuery,
) -> AppResult<Vec<Review>> {
    if let Some(min) = params.min_rating {
        validate_rating(min)?;
    }
    ensure_photographer(pool, photographer_id).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);
    let reviews =
        ReviewRepo::list_for_photographer(pool, photographer_id, params.min_rating, limit, offset)
            .await?;
    Ok(reviews)
}

pub async fn review_stats(pool: &PgPool, photographer_id: DbId) -> AppResult<ReviewStats> {
    ensure_photographer(pool, photographer_id).await?;
    Ok(ReviewRepo::stats_for_photographer(pool, photographer_id).await?)
}

/// The stored (incrementally folded) rating aggregate.
pub async fn photographer_rating(
    pool: &PgPool,
    photographer_id: DbId,
) -> AppResult<PhotographerRating> {
    PhotographerRepo::get_rating(pool, photographer_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Photographer",
                id: photographer_id,
            })
        })
}

async fn ensure_photographer(pool: &PgPool, photographer_id: DbId) -> AppResult<()> {
    if PhotographerRepo::exists(pool, photographer_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Photographer",
            id: photographer_id,
        }))
    }
}

fn already_reviewed() -> AppError {
    AppError::Core(CoreError::Conflict(
        "You have already reviewed this photographer".into(),
    ))
}
