//! Half-open booking time slots.
//!
//! A slot is `[start, end)`: the start instant is included, the end instant is
//! not, so back-to-back bookings (`a.end == b.start`) never overlap. The same
//! semantics are enforced in the database with `tstzrange(start, end, '[)')`.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// A validated `[start, end)` interval with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    start: Timestamp,
    end: Timestamp,
}

impl TimeSlot {
    /// Build a slot, failing with [`CoreError::InvalidRange`] unless `start < end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if end <= start {
            return Err(CoreError::InvalidRange(format!(
                "end_time ({end}) must be after start_time ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Half-open overlap test. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn slot(start: u32, end: u32) -> TimeSlot {
        TimeSlot::new(at(start), at(end)).unwrap()
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_matches!(TimeSlot::new(at(12), at(10)), Err(CoreError::InvalidRange(_)));
    }

    #[test]
    fn empty_range_is_rejected() {
        assert_matches!(TimeSlot::new(at(10), at(10)), Err(CoreError::InvalidRange(_)));
    }

    #[test]
    fn partial_overlap_is_detected_both_ways() {
        assert!(slot(10, 12).overlaps(&slot(11, 13)));
        assert!(slot(11, 13).overlaps(&slot(10, 12)));
    }

    #[test]
    fn containment_is_an_overlap() {
        assert!(slot(9, 17).overlaps(&slot(12, 13)));
        assert!(slot(12, 13).overlaps(&slot(9, 17)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!slot(10, 12).overlaps(&slot(12, 14)));
        assert!(!slot(12, 14).overlaps(&slot(10, 12)));
    }

    #[test]
    fn disjoint_slots_do_not_overlap() {
        assert!(!slot(8, 9).overlaps(&slot(15, 16)));
    }
}
