//! Booking statistics helpers.

use chrono::{Datelike, TimeZone, Utc};

use crate::types::Timestamp;

/// Number of calendar months covered by the monthly booking histogram,
/// including the current month.
pub const STATS_MONTHS: u32 = 6;

/// First instant of the month `STATS_MONTHS - 1` months before `now`'s month.
pub fn monthly_window_start(now: Timestamp) -> Timestamp {
    let months_back = (STATS_MONTHS - 1) as i32;
    let total = now.year() * 12 + now.month0() as i32 - months_back;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_starts_five_months_back_on_the_first() {
        let now = Utc.with_ymd_and_hms(2025, 8, 17, 13, 45, 0).unwrap();
        assert_eq!(
            monthly_window_start(now),
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn window_crosses_year_boundary() {
        let now = Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap();
        assert_eq!(
            monthly_window_start(now),
            Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()
        );
    }
}
