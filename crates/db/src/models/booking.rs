//! Booking entity models and DTOs.

use std::collections::BTreeMap;

use bookmyshoot_core::booking::{BookingParties, BookingStatus};
use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::roles::{Actor, Role};
use bookmyshoot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub customer_id: DbId,
    pub photographer_id: DbId,
    pub status_id: i16,
    pub event_type: String,
    pub combo_type: String,
    pub city: String,
    pub sub_location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_hours: f64,
    pub total_amount: f64,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Decode the stored status id.
    ///
    /// The `status_id` foreign key guarantees a known id, so an unknown value
    /// indicates schema drift and is reported as an internal error.
    pub fn status(&self) -> Result<BookingStatus, CoreError> {
        BookingStatus::from_id(self.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "Booking {} has unknown status_id {}",
                self.id, self.status_id
            ))
        })
    }

    pub fn parties(&self) -> BookingParties {
        BookingParties {
            customer_id: self.customer_id,
            photographer_id: self.photographer_id,
        }
    }

    pub fn location(&self) -> Location {
        Location {
            city: self.city.clone(),
            sub_location: self.sub_location.clone(),
            coordinates: self.latitude.zip(self.longitude),
        }
    }
}

/// Where the shoot takes place. `coordinates` is `(latitude, longitude)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(length(min = 1, max = 200))]
    pub city: String,
    #[validate(length(max = 200))]
    pub sub_location: Option<String>,
    pub coordinates: Option<(f64, f64)>,
}

impl Location {
    /// Checks the derive cannot express: a non-blank city and coordinate bounds.
    pub fn check_values(&self) -> Result<(), CoreError> {
        if self.city.trim().is_empty() {
            return Err(CoreError::Validation("location.city must not be empty".into()));
        }
        if let Some((lat, lon)) = self.coordinates {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(CoreError::Validation(format!(
                    "location.coordinates out of range: ({lat}, {lon})"
                )));
            }
        }
        Ok(())
    }
}

/// Booking as returned by the API: status resolved to its name and the
/// location fields nested.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: DbId,
    pub customer_id: DbId,
    pub photographer_id: DbId,
    pub status: BookingStatus,
    pub event_type: String,
    pub combo_type: String,
    pub location: Location,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_hours: f64,
    pub total_amount: f64,
    pub special_requests: Option<String>,
    pub cancellation_reason: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Booking> for BookingResponse {
    type Error = CoreError;

    fn try_from(b: Booking) -> Result<Self, Self::Error> {
        let status = b.status()?;
        let location = b.location();
        Ok(Self {
            id: b.id,
            customer_id: b.customer_id,
            photographer_id: b.photographer_id,
            status,
            event_type: b.event_type,
            combo_type: b.combo_type,
            location,
            start_time: b.start_time,
            end_time: b.end_time,
            total_hours: b.total_hours,
            total_amount: b.total_amount,
            special_requests: b.special_requests,
            cancellation_reason: b.cancellation_reason,
            updated_by: b.updated_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
        })
    }
}

/// DTO for creating a booking. The customer is the authenticated actor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBooking {
    pub photographer_id: DbId,
    #[validate(length(min = 1, max = 50))]
    pub event_type: String,
    #[validate(length(min = 1, max = 50))]
    pub combo_type: String,
    #[validate(nested)]
    pub location: Location,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub total_hours: f64,
    pub total_amount: f64,
    #[validate(length(max = 2000))]
    pub special_requests: Option<String>,
}

/// DTO for patching a booking's descriptive fields and time slot.
///
/// Status, party ids, and `cancellation_reason` are deliberately absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBooking {
    #[validate(length(min = 1, max = 50))]
    pub event_type: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub combo_type: Option<String>,
    #[validate(nested)]
    pub location: Option<Location>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub total_hours: Option<f64>,
    pub total_amount: Option<f64>,
    #[validate(length(max = 2000))]
    pub special_requests: Option<String>,
}

impl UpdateBooking {
    pub fn touches_slot(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }
}

/// Query parameters for `GET /api/v1/bookings`.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    /// Filter by status name (e.g. `pending`).
    pub status: Option<String>,
    /// Number of results to skip. Defaults to 0.
    pub skip: Option<i64>,
    /// Maximum number of results. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
}

/// Which bookings a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    All,
    Customer(DbId),
    Photographer(DbId),
}

impl BookingScope {
    /// Customers see their own bookings, photographers their assigned ones,
    /// admins everything.
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.role {
            Role::Admin => BookingScope::All,
            Role::Customer => BookingScope::Customer(actor.user_id),
            Role::Photographer => BookingScope::Photographer(actor.user_id),
        }
    }
}

/// Per-status count row.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountRow {
    pub status_id: i16,
    pub count: i64,
}

/// Bookings created in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

/// Aggregate booking statistics for one photographer.
#[derive(Debug, Clone, Serialize)]
pub struct BookingStats {
    pub total: i64,
    /// Count per status name; statuses with no bookings are reported as 0.
    pub status_counts: BTreeMap<String, i64>,
    /// Ascending by `(year, month)`.
    pub monthly: Vec<MonthlyCount>,
}
