//! Incremental rating aggregation.
//!
//! A photographer's rating is stored as a running `(average, count)` pair and
//! folded one review at a time:
//!
//! ```text
//! avg' = round2((avg * n + r) / (n + 1))
//! n'   = n + 1
//! ```
//!
//! The stored average is rounded to two decimals after every fold, so the
//! result can drift by a few hundredths from the exact mean over many reviews.
//! The database applies the identical expression in a single `UPDATE`; this
//! module is the reference used by validation and tests.

use crate::error::CoreError;

pub const RATING_MIN: i16 = 1;
pub const RATING_MAX: i16 = 5;

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place, used for review-stats summaries.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Fold one new rating into an existing `(average, count)` aggregate.
pub fn fold_rating(avg: f64, count: i32, rating: i16) -> (f64, i32) {
    let n = f64::from(count);
    let next = (avg * n + f64::from(rating)) / (n + 1.0);
    (round2(next), count + 1)
}

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold_all(ratings: &[i16]) -> (f64, i32) {
        ratings
            .iter()
            .fold((0.0, 0), |(avg, n), r| fold_rating(avg, n, *r))
    }

    #[test]
    fn first_rating_becomes_the_average() {
        assert_eq!(fold_rating(0.0, 0, 4), (4.0, 1));
    }

    #[test]
    fn three_ratings_average_exactly() {
        let (avg, n) = fold_all(&[5, 3, 4]);
        assert_eq!(n, 3);
        assert!((avg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn order_does_not_matter_for_two_ratings() {
        assert_eq!(fold_all(&[4, 2]), (3.0, 2));
        assert_eq!(fold_all(&[2, 4]), (3.0, 2));
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        // (5 + 4 + 4) / 3 = 4.333...
        let (avg, n) = fold_all(&[5, 4, 4]);
        assert_eq!(n, 3);
        assert_eq!(avg, 4.33);
    }

    #[test]
    fn rounding_drift_stays_small() {
        let ratings = [5, 4, 4, 5, 3, 5, 4, 2, 5, 4, 4, 3];
        let (avg, n) = fold_all(&ratings);
        let exact = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
        assert_eq!(n, ratings.len() as i32);
        assert!((avg - exact).abs() < 0.05);
    }

    #[test]
    fn rating_bounds_are_enforced() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn round1_summary() {
        assert_eq!(round1(4.333), 4.3);
        assert_eq!(round1(4.25), 4.3);
    }
}
