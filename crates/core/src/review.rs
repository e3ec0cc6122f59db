//! Review field validation and the preconditions a review must satisfy
//! against its booking.

use crate::booking::BookingStatus;
use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length of a review comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Maximum number of media attachments per review.
pub const MAX_MEDIA_URLS: usize = 10;

pub fn validate_comment(comment: Option<&str>) -> Result<(), CoreError> {
    match comment {
        Some(c) if c.chars().count() > MAX_COMMENT_LENGTH => Err(CoreError::Validation(format!(
            "comment exceeds {MAX_COMMENT_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

/// Media URLs must be absolute http(s) URLs, at most [`MAX_MEDIA_URLS`] of them.
pub fn validate_media_urls(urls: &[String]) -> Result<(), CoreError> {
    if urls.len() > MAX_MEDIA_URLS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_MEDIA_URLS} media URLs are allowed"
        )));
    }
    for url in urls {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CoreError::Validation(format!(
                "Invalid media URL '{url}': must start with http:// or https://"
            )));
        }
    }
    Ok(())
}

/// The booking a review refers to, as seen by the review precondition check.
#[derive(Debug, Clone, Copy)]
pub struct ReviewedBooking {
    pub customer_id: DbId,
    pub photographer_id: DbId,
    pub status: BookingStatus,
}

/// A review may only be left by the booking's customer, for the booking's
/// photographer, once the booking is completed.
pub fn check_review_preconditions(
    reviewer_id: DbId,
    photographer_id: DbId,
    booking: &ReviewedBooking,
) -> Result<(), CoreError> {
    if booking.customer_id != reviewer_id {
        return Err(CoreError::Forbidden(
            "Only the booking's customer can review it".into(),
        ));
    }
    if booking.photographer_id != photographer_id {
        return Err(CoreError::Validation(
            "Booking does not belong to this photographer".into(),
        ));
    }
    if booking.status != BookingStatus::Completed {
        return Err(CoreError::Validation(format!(
            "Only completed bookings can be reviewed (booking is {})",
            booking.status
        )));
    }
    Ok(())
}
