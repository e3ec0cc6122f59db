//! Limit/offset clamping for list endpoints.

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 20;

/// Hard upper bound for any page size.
pub const MAX_LIMIT: i64 = 100;

/// Default number of rows returned by the upcoming-bookings query.
pub const UPCOMING_DEFAULT_LIMIT: i64 = 5;

/// Upper bound for the upcoming-bookings query.
pub const UPCOMING_MAX_LIMIT: i64 = 50;

/// Clamp a user-provided limit to `[1, max]`, defaulting to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIMIT, MAX_LIMIT), 20);
        assert_eq!(
            clamp_limit(None, UPCOMING_DEFAULT_LIMIT, UPCOMING_MAX_LIMIT),
            5
        );
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(Some(500), DEFAULT_LIMIT, MAX_LIMIT), 100);
        assert_eq!(clamp_limit(Some(0), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(-3), DEFAULT_LIMIT, MAX_LIMIT), 1);
        assert_eq!(clamp_limit(Some(42), DEFAULT_LIMIT, MAX_LIMIT), 42);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}
