//! Event type names published on the platform event bus.
//!
//! Dotted `<entity>.<verb>` names. Consumers match on these constants rather
//! than string literals.

/// A booking request was accepted into the PENDING state.
pub const BOOKING_CREATED: &str = "booking.created";

/// A booking moved between statuses.
pub const BOOKING_STATUS_CHANGED: &str = "booking.status_changed";

/// A booking's descriptive details or time slot were edited.
pub const BOOKING_UPDATED: &str = "booking.updated";

/// A review was recorded and folded into the photographer's rating.
pub const REVIEW_CREATED: &str = "review.created";

/// Notification `type` column values.
pub const NOTIFICATION_TYPE_BOOKING: &str = "booking";
pub const NOTIFICATION_TYPE_REVIEW: &str = "review";

/// Notification `related_entity_type` values.
pub const ENTITY_BOOKING: &str = "booking";
pub const ENTITY_REVIEW: &str = "review";
