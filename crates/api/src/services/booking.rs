//! Booking orchestration: availability, creation, reads, status transitions,
//! detail edits, and statistics.
//!
//! Every function takes the authenticated [`Actor`] and enforces the
//! authorization rules from `bookmyshoot_core::booking` before touching the
//! store. Overlap safety does not depend on the availability pre-check: the
//! `ex_bookings_photographer_slot` constraint rejects any write that would
//! double-book, and that rejection surfaces as `SlotConflict`.

use bookmyshoot_core::booking::{
    authorize_edit, authorize_transition, authorize_view, validate_amounts,
    validate_cancellation_reason, validate_combo_type, validate_event_type,
    validate_special_requests, BookingStatus,
};
use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::pagination::{
    clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT, UPCOMING_DEFAULT_LIMIT,
    UPCOMING_MAX_LIMIT,
};
use bookmyshoot_core::roles::{Actor, Role};
use bookmyshoot_core::slot::TimeSlot;
use bookmyshoot_core::stats::monthly_window_start;
use bookmyshoot_core::types::{DbId, Timestamp};
use bookmyshoot_db::models::booking::{
    Booking, BookingListQuery, BookingResponse, BookingScope, BookingStats, CreateBooking,
    UpdateBooking,
};
use bookmyshoot_db::repositories::{BookingRepo, PhotographerRepo};
use bookmyshoot_events::{EventBus, PlatformEvent};
use sqlx::PgPool;

use crate::error::{is_constraint_violation, AppError, AppResult, PG_EXCLUSION_VIOLATION};

/// Exclusion constraint that forbids overlapping active bookings.
pub const SLOT_CONSTRAINT: &str = "ex_bookings_photographer_slot";

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Whether the photographer has no active booking overlapping `[start, end)`.
pub async fn check_availability(
    pool: &PgPool,
    photographer_id: DbId,
    start: Timestamp,
    end: Timestamp,
    exclude_booking_id: Option<DbId>,
) -> AppResult<bool> {
    let slot = TimeSlot::new(start, end)?;
    let conflict =
        BookingRepo::has_conflict(pool, photographer_id, &slot, exclude_booking_id).await?;
    Ok(!conflict)
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

/// Request a booking on behalf of the customer `actor`.
pub async fn create_booking(
    pool: &PgPool,
    bus: &EventBus,
    actor: &Actor,
    input: &CreateBooking,
) -> AppResult<BookingResponse> {
    let slot = TimeSlot::new(input.start_time, input.end_time)?;
    validate_event_type(&input.event_type)?;
    validate_combo_type(&input.combo_type)?;
    validate_amounts(input.total_hours, input.total_amount)?;
    validate_special_requests(input.special_requests.as_deref())?;
    input.location.check_values()?;

    if !PhotographerRepo::exists(pool, input.photographer_id).await? {
        return Err(CoreError::NotFound {
            entity: "Photographer",
            id: input.photographer_id,
        }
        .into());
    }

    if BookingRepo::has_conflict(pool, input.photographer_id, &slot, None).await? {
        return Err(slot_conflict(input.photographer_id));
    }

    let booking = BookingRepo::create(pool, actor.user_id, input)
        .await
        .map_err(|e| map_slot_violation(e, input.photographer_id))?;

    tracing::info!(
        booking_id = booking.id,
        customer_id = booking.customer_id,
        photographer_id = booking.photographer_id,
        start_time = %booking.start_time,
        end_time = %booking.end_time,
        "Booking created",
    );
    bus.publish(PlatformEvent::booking_created(booking.id, booking.parties()));

    to_response(booking)
}

/// Load a booking the actor may see.
pub async fn get_booking(pool: &PgPool, actor: &Actor, id: DbId) -> AppResult<BookingResponse> {
    let booking = load(pool, id).await?;
    authorize_view(actor, &booking.parties())?;
    to_response(booking)
}

/// Role-scoped listing: customers see their own bookings, photographers the
/// ones assigned to them, admins all. Newest start first.
pub async fn list_bookings(
    pool: &PgPool,
    actor: &Actor,
    params: &BookingListQuery,
) -> AppResult<Vec<BookingResponse>> {
    let status = params
        .status
        .as_deref()
        .map(BookingStatus::parse)
        .transpose()?;
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.skip);

    let bookings =
        BookingRepo::list(pool, BookingScope::for_actor(actor), status, limit, offset).await?;
    bookings.into_iter().map(to_response).collect()
}

/// Confirmed or in-progress bookings that have not started yet, soonest first.
pub async fn upcoming_bookings(
    pool: &PgPool,
    actor: &Actor,
    limit: Option<i64>,
) -> AppResult<Vec<BookingResponse>> {
    let limit = clamp_limit(limit, UPCOMING_DEFAULT_LIMIT, UPCOMING_MAX_LIMIT);
    let bookings = BookingRepo::list_upcoming(
        pool,
        BookingScope::for_actor(actor),
        chrono::Utc::now(),
        limit,
    )
    .await?;
    bookings.into_iter().map(to_response).collect()
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// Move a booking to `target`.
///
/// The write is conditional on the status observed at load time. If another
/// writer moved the booking in between, the call fails with `Conflict` and
/// the caller should reload before retrying.
pub async fn update_booking_status(
    pool: &PgPool,
    bus: &EventBus,
    actor: &Actor,
    id: DbId,
    target: BookingStatus,
    cancellation_reason: Option<&str>,
) -> AppResult<BookingResponse> {
    validate_cancellation_reason(cancellation_reason)?;

    let booking = load(pool, id).await?;
    let current = booking.status()?;
    authorize_transition(actor, &booking.parties(), current, target)?;

    let updated = BookingRepo::transition_status(
        pool,
        id,
        current,
        target,
        cancellation_reason,
        actor.role.as_str(),
    )
    .await
    .map_err(|e| map_slot_violation(e, booking.photographer_id))?;

    let Some(updated) = updated else {
        // Either deleted or moved by a concurrent writer since `load`.
        return match BookingRepo::find_by_id(pool, id).await? {
            None => Err(not_found(id)),
            Some(_) => Err(CoreError::Conflict(format!(
                "Booking {id} is no longer {current}; reload and retry"
            ))
            .into()),
        };
    };

    tracing::info!(
        booking_id = id,
        from = %current,
        to = %target,
        actor_id = actor.user_id,
        role = %actor.role,
        "Booking status changed",
    );
    bus.publish(PlatformEvent::booking_status_changed(
        id,
        updated.parties(),
        current,
        target,
        actor.user_id,
    ));

    to_response(updated)
}

/// Patch descriptive fields and/or the time slot.
///
/// Status, parties, and the cancellation reason cannot be changed here. A new
/// slot for an active booking is re-checked against the photographer's other
/// active bookings.
pub async fn update_booking_details(
    pool: &PgPool,
    bus: &EventBus,
    actor: &Actor,
    id: DbId,
    patch: &UpdateBooking,
) -> AppResult<BookingResponse> {
    let booking = load(pool, id).await?;
    authorize_edit(actor, &booking.parties())?;

    if let Some(event_type) = &patch.event_type {
        validate_event_type(event_type)?;
    }
    if let Some(combo_type) = &patch.combo_type {
        validate_combo_type(combo_type)?;
    }
    if let Some(location) = &patch.location {
        location.check_values()?;
    }
    validate_amounts(
        patch.total_hours.unwrap_or(booking.total_hours),
        patch.total_amount.unwrap_or(booking.total_amount),
    )?;
    validate_special_requests(patch.special_requests.as_deref())?;

    if patch.touches_slot() {
        let slot = TimeSlot::new(
            patch.start_time.unwrap_or(booking.start_time),
            patch.end_time.unwrap_or(booking.end_time),
        )?;
        if booking.status()?.is_active()
            && BookingRepo::has_conflict(pool, booking.photographer_id, &slot, Some(id)).await?
        {
            return Err(slot_conflict(booking.photographer_id));
        }
    }

    let updated = BookingRepo::update_details(pool, id, patch)
        .await
        .map_err(|e| map_slot_violation(e, booking.photographer_id))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(booking_id = id, actor_id = actor.user_id, "Booking details updated");
    bus.publish(PlatformEvent::booking_updated(
        id,
        updated.parties(),
        actor.user_id,
    ));

    to_response(updated)
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Booking totals for a photographer. Visible to admins and the photographer.
pub async fn booking_stats(
    pool: &PgPool,
    actor: &Actor,
    photographer_id: DbId,
) -> AppResult<BookingStats> {
    let is_self = actor.role == Role::Photographer && actor.user_id == photographer_id;
    if !actor.is_admin() && !is_self {
        return Err(CoreError::Forbidden(
            "Only admins or the photographer can view booking statistics".into(),
        )
        .into());
    }

    if !PhotographerRepo::exists(pool, photographer_id).await? {
        return Err(CoreError::NotFound {
            entity: "Photographer",
            id: photographer_id,
        }
        .into());
    }

    let since = monthly_window_start(chrono::Utc::now());
    Ok(BookingRepo::stats_for_photographer(pool, photographer_id, since).await?)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load(pool: &PgPool, id: DbId) -> AppResult<Booking> {
    BookingRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

fn to_response(booking: Booking) -> AppResult<BookingResponse> {
    Ok(BookingResponse::try_from(booking)?)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Booking",
        id,
    })
}

fn slot_conflict(photographer_id: DbId) -> AppError {
    AppError::Core(CoreError::SlotConflict(format!(
        "Photographer {photographer_id} already has an active booking in this time slot"
    )))
}

fn map_slot_violation(err: sqlx::Error, photographer_id: DbId) -> AppError {
    if is_constraint_violation(&err, PG_EXCLUSION_VIOLATION, SLOT_CONSTRAINT) {
        tracing::debug!(photographer_id, "Slot claimed concurrently");
        slot_conflict(photographer_id)
    } else {
        AppError::Database(err)
    }
}
