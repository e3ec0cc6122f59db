//! Repository for the `bookings` table.
//!
//! Overlap between active bookings is ultimately prevented by the
//! `ex_bookings_photographer_slot` exclusion constraint; [`BookingRepo::has_conflict`]
//! is a read-only pre-check. Status changes are compare-and-set on `status_id`.

use std::collections::BTreeMap;

use bookmyshoot_core::booking::{BookingStatus, ACTIVE_STATUSES, ALL_STATUSES};
use bookmyshoot_core::slot::TimeSlot;
use bookmyshoot_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::booking::{
    Booking, BookingScope, BookingStats, CreateBooking, MonthlyCount, StatusCountRow,
    UpdateBooking,
};

/// Column list for `bookings` queries.
const COLUMNS: &str = "\
    id, customer_id, photographer_id, status_id, event_type, combo_type, \
    city, sub_location, latitude, longitude, start_time, end_time, \
    total_hours, total_amount, special_requests, cancellation_reason, \
    updated_by, created_at, updated_at";

fn active_status_ids() -> Vec<i16> {
    ACTIVE_STATUSES.iter().map(|s| s.id()).collect()
}

/// Builds the scope predicate for `$1` and reports whether `$1` is bound.
fn scope_clause(scope: BookingScope) -> (&'static str, Option<DbId>) {
    match scope {
        BookingScope::All => ("($1::BIGINT IS NULL)", None),
        BookingScope::Customer(id) => ("customer_id = $1", Some(id)),
        BookingScope::Photographer(id) => ("photographer_id = $1", Some(id)),
    }
}

/// Provides persistence for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking in the PENDING state.
    ///
    /// Fails with a `23P01` database error on `ex_bookings_photographer_slot`
    /// if an active booking for the same photographer overlaps.
    pub async fn create(
        pool: &PgPool,
        customer_id: DbId,
        input: &CreateBooking,
    ) -> Result<Booking, sqlx::Error> {
        let (latitude, longitude) = input.location.coordinates.unzip();
        let query = format!(
            "INSERT INTO bookings \
                (customer_id, photographer_id, status_id, event_type, combo_type, \
                 city, sub_location, latitude, longitude, start_time, end_time, \
                 total_hours, total_amount, special_requests) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(customer_id)
            .bind(input.photographer_id)
            .bind(BookingStatus::Pending.id())
            .bind(&input.event_type)
            .bind(&input.combo_type)
            .bind(&input.location.city)
            .bind(&input.location.sub_location)
            .bind(latitude)
            .bind(longitude)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.total_hours)
            .bind(input.total_amount)
            .bind(&input.special_requests)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active booking for `photographer_id` overlaps `slot`.
    ///
    /// Uses half-open semantics: `existing.start < slot.end AND existing.end > slot.start`.
    /// `exclude_booking_id` removes one booking from consideration (used when
    /// rescheduling that booking).
    pub async fn has_conflict(
        pool: &PgPool,
        photographer_id: DbId,
        slot: &TimeSlot,
        exclude_booking_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM bookings \
                WHERE photographer_id = $1 \
                  AND status_id = ANY($2) \
                  AND start_time < $4 \
                  AND end_time > $3 \
                  AND ($5::BIGINT IS NULL OR id <> $5) \
             )",
        )
        .bind(photographer_id)
        .bind(active_status_ids())
        .bind(slot.start())
        .bind(slot.end())
        .bind(exclude_booking_id)
        .fetch_one(pool)
        .await
    }

    /// Move a booking from `expected` to `target` if it is still in `expected`.
    ///
    /// `cancellation_reason` is stored only when `target` is CANCELLED and
    /// cleared otherwise. Returns `None` when the row is missing or its status
    /// no longer matches `expected`.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        expected: BookingStatus,
        target: BookingStatus,
        cancellation_reason: Option<&str>,
        updated_by: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let reason = if target == BookingStatus::Cancelled {
            cancellation_reason
        } else {
            None
        };
        let query = format!(
            "UPDATE bookings SET \
                status_id = $3, \
                cancellation_reason = $4, \
                updated_by = $5, \
                updated_at = NOW() \
             WHERE id = $1 AND status_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(expected.id())
            .bind(target.id())
            .bind(reason)
            .bind(updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Patch descriptive fields and/or the time slot. Only non-`None` fields
    /// are applied; a `location` replaces all location columns together.
    pub async fn update_details(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBooking,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let location = input.location.as_ref();
        let (latitude, longitude) = location.and_then(|l| l.coordinates).unzip();
        let query = format!(
            "UPDATE bookings SET \
                event_type = COALESCE($2, event_type), \
                combo_type = COALESCE($3, combo_type), \
                city = COALESCE($4, city), \
                sub_location = CASE WHEN $4::TEXT IS NULL THEN sub_location ELSE $5 END, \
                latitude = CASE WHEN $4::TEXT IS NULL THEN latitude ELSE $6 END, \
                longitude = CASE WHEN $4::TEXT IS NULL THEN longitude ELSE $7 END, \
                start_time = COALESCE($8, start_time), \
                end_time = COALESCE($9, end_time), \
                total_hours = COALESCE($10, total_hours), \
                total_amount = COALESCE($11, total_amount), \
                special_requests = COALESCE($12, special_requests), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&input.event_type)
            .bind(&input.combo_type)
            .bind(location.map(|l| l.city.as_str()))
            .bind(location.and_then(|l| l.sub_location.as_deref()))
            .bind(latitude)
            .bind(longitude)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.total_hours)
            .bind(input.total_amount)
            .bind(&input.special_requests)
            .fetch_optional(pool)
            .await
    }

    /// List bookings visible under `scope`, newest start first.
    pub async fn list(
        pool: &PgPool,
        scope: BookingScope,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let (scope_sql, scope_id) = scope_clause(scope);
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE {scope_sql} \
               AND ($2::SMALLINT IS NULL OR status_id = $2) \
             ORDER BY start_time DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(scope_id)
            .bind(status.map(BookingStatus::id))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// CONFIRMED or IN_PROGRESS bookings starting after `now`, soonest first.
    pub async fn list_upcoming(
        pool: &PgPool,
        scope: BookingScope,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let (scope_sql, scope_id) = scope_clause(scope);
        let query = format!(
            "SELECT {COLUMNS} FROM bookings \
             WHERE {scope_sql} \
               AND status_id = ANY($2) \
               AND start_time > $3 \
             ORDER BY start_time ASC, id ASC \
             LIMIT $4"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(scope_id)
            .bind(vec![
                BookingStatus::Confirmed.id(),
                BookingStatus::InProgress.id(),
            ])
            .bind(now)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Totals, per-status counts, and monthly creation counts since `since`.
    pub async fn stats_for_photographer(
        pool: &PgPool,
        photographer_id: DbId,
        since: Timestamp,
    ) -> Result<BookingStats, sqlx::Error> {
        let rows = sqlx::query_as::<_, StatusCountRow>(
            "SELECT status_id, COUNT(*) AS count FROM bookings \
             WHERE photographer_id = $1 \
             GROUP BY status_id",
        )
        .bind(photographer_id)
        .fetch_all(pool)
        .await?;

        let mut status_counts: BTreeMap<String, i64> = ALL_STATUSES
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        let mut total = 0;
        for row in rows {
            total += row.count;
            if let Some(status) = BookingStatus::from_id(row.status_id) {
                status_counts.insert(status.as_str().to_string(), row.count);
            }
        }

        let monthly = sqlx::query_as::<_, MonthlyCount>(
            "SELECT EXTRACT(YEAR FROM created_at AT TIME ZONE 'UTC')::INT AS year, \
                    EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::INT AS month, \
                    COUNT(*) AS count \
             FROM bookings \
             WHERE photographer_id = $1 AND created_at >= $2 \
             GROUP BY 1, 2 \
             ORDER BY 1, 2",
        )
        .bind(photographer_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(BookingStats {
            total,
            status_counts,
            monthly,
        })
    }
}
