//! Booking lifecycle: statuses, the role-based transition table, and
//! authorization checks.
//!
//! This module lives in `core` (zero internal deps) so the repository layer
//! and the API services share one definition of who may do what to a booking.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::{Actor, Role};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Booking status. Discriminants match the `booking_statuses` seed data.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending = 1,
    Confirmed = 2,
    InProgress = 3,
    Completed = 4,
    Cancelled = 5,
    Rejected = 6,
}

/// Statuses that occupy the photographer's calendar.
pub const ACTIVE_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::InProgress,
];

pub const ALL_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::InProgress,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
    BookingStatus::Rejected,
];

impl BookingStatus {
    /// Return the database status ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        ALL_STATUSES.iter().copied().find(|s| s.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(name: &str) -> Result<Self, CoreError> {
        ALL_STATUSES
            .iter()
            .copied()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid booking status '{name}'. Must be one of: {}",
                    ALL_STATUSES
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Active bookings block overlapping requests for the same photographer.
    pub fn is_active(self) -> bool {
        ACTIVE_STATUSES.contains(&self)
    }

    /// No further transitions are expected in normal operation.
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transition table
// ---------------------------------------------------------------------------

/// Target statuses a non-admin role may set from `from`.
///
/// Admins are not covered by this table: they may set any status from any
/// status (see [`can_transition`]).
pub fn allowed_targets(role: Role, from: BookingStatus) -> &'static [BookingStatus] {
    use BookingStatus::*;

    match (role, from) {
        (Role::Customer, Pending) => &[Cancelled],
        (Role::Customer, Confirmed) => &[Cancelled],
        (Role::Photographer, Pending) => &[Confirmed, Rejected],
        (Role::Photographer, Confirmed) => &[InProgress, Cancelled],
        (Role::Photographer, InProgress) => &[Completed],
        (Role::Admin, _) => ALL_STATUSES,
        _ => &[],
    }
}

/// Whether `role` may move a booking from `from` to `to`.
pub fn can_transition(role: Role, from: BookingStatus, to: BookingStatus) -> bool {
    role == Role::Admin || allowed_targets(role, from).contains(&to)
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

/// The two parties of record on a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingParties {
    pub customer_id: DbId,
    pub photographer_id: DbId,
}

impl BookingParties {
    /// Whether the actor is a party of record in the capacity their role implies.
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        match actor.role {
            Role::Customer => self.customer_id == actor.user_id,
            Role::Photographer => self.photographer_id == actor.user_id,
            Role::Admin => false,
        }
    }

    /// Users that should hear about a change made by `actor`.
    pub fn counterparts_of(&self, actor_user_id: DbId) -> Vec<DbId> {
        [self.customer_id, self.photographer_id]
            .into_iter()
            .filter(|id| *id != actor_user_id)
            .collect()
    }
}

/// Read access: admin, or either party of record.
pub fn authorize_view(actor: &Actor, parties: &BookingParties) -> Result<(), CoreError> {
    if actor.is_admin() || parties.is_owned_by(actor) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Not enough permissions to view this booking".into(),
        ))
    }
}

/// Detail edits follow the same rule as reads.
pub fn authorize_edit(actor: &Actor, parties: &BookingParties) -> Result<(), CoreError> {
    if actor.is_admin() || parties.is_owned_by(actor) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Not enough permissions to update this booking".into(),
        ))
    }
}

/// Ownership check first, then the transition table.
pub fn authorize_transition(
    actor: &Actor,
    parties: &BookingParties,
    from: BookingStatus,
    to: BookingStatus,
) -> Result<(), CoreError> {
    if actor.is_admin() {
        return Ok(());
    }

    if !parties.is_owned_by(actor) {
        return Err(CoreError::Forbidden(
            "Not enough permissions to update this booking".into(),
        ));
    }

    if !can_transition(actor.role, from, to) {
        return Err(CoreError::Forbidden(format!(
            "A {} may not move a booking from {from} to {to}",
            actor.role
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Descriptive fields
// ---------------------------------------------------------------------------

pub const EVENT_TYPE_WEDDING: &str = "wedding";
pub const EVENT_TYPE_PRE_WEDDING: &str = "pre_wedding";
pub const EVENT_TYPE_BIRTHDAY: &str = "birthday";
pub const EVENT_TYPE_CORPORATE: &str = "corporate";
pub const EVENT_TYPE_INAUGURATION: &str = "inauguration";
pub const EVENT_TYPE_PROMOTION: &str = "promotion";
pub const EVENT_TYPE_INFLUENCER: &str = "influencer";
pub const EVENT_TYPE_OTHER: &str = "other";

pub const VALID_EVENT_TYPES: &[&str] = &[
    EVENT_TYPE_WEDDING,
    EVENT_TYPE_PRE_WEDDING,
    EVENT_TYPE_BIRTHDAY,
    EVENT_TYPE_CORPORATE,
    EVENT_TYPE_INAUGURATION,
    EVENT_TYPE_PROMOTION,
    EVENT_TYPE_INFLUENCER,
    EVENT_TYPE_OTHER,
];

pub const COMBO_PHOTO_ONLY: &str = "photo_only";
pub const COMBO_VIDEO_ONLY: &str = "video_only";
pub const COMBO_PHOTO_PLUS_VIDEO: &str = "photo_plus_video";
pub const COMBO_PHOTO_PLUS_DRONE: &str = "photo_plus_drone";
pub const COMBO_ALL_SERVICES: &str = "all_services";

pub const VALID_COMBO_TYPES: &[&str] = &[
    COMBO_PHOTO_ONLY,
    COMBO_VIDEO_ONLY,
    COMBO_PHOTO_PLUS_VIDEO,
    COMBO_PHOTO_PLUS_DRONE,
    COMBO_ALL_SERVICES,
];

/// Maximum length of free-text special requests.
pub const MAX_SPECIAL_REQUESTS_LENGTH: usize = 2_000;

/// Maximum length of a cancellation reason.
pub const MAX_CANCELLATION_REASON_LENGTH: usize = 1_000;

pub fn validate_event_type(event_type: &str) -> Result<(), CoreError> {
    if VALID_EVENT_TYPES.contains(&event_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid event_type '{event_type}'. Must be one of: {}",
            VALID_EVENT_TYPES.join(", ")
        )))
    }
}

pub fn validate_combo_type(combo_type: &str) -> Result<(), CoreError> {
    if VALID_COMBO_TYPES.contains(&combo_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid combo_type '{combo_type}'. Must be one of: {}",
            VALID_COMBO_TYPES.join(", ")
        )))
    }
}

/// `total_hours` must be positive, `total_amount` non-negative, both finite.
pub fn validate_amounts(total_hours: f64, total_amount: f64) -> Result<(), CoreError> {
    if !total_hours.is_finite() || total_hours <= 0.0 {
        return Err(CoreError::Validation(
            "total_hours must be a positive number".into(),
        ));
    }
    if !total_amount.is_finite() || total_amount < 0.0 {
        return Err(CoreError::Validation(
            "total_amount must be a non-negative number".into(),
        ));
    }
    Ok(())
}

pub fn validate_special_requests(text: Option<&str>) -> Result<(), CoreError> {
    match text {
        Some(t) if t.chars().count() > MAX_SPECIAL_REQUESTS_LENGTH => {
            Err(CoreError::Validation(format!(
                "special_requests exceeds {MAX_SPECIAL_REQUESTS_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

pub fn validate_cancellation_reason(reason: Option<&str>) -> Result<(), CoreError> {
    match reason {
        Some(r) if r.chars().count() > MAX_CANCELLATION_REASON_LENGTH => {
            Err(CoreError::Validation(format!(
                "cancellation_reason exceeds {MAX_CANCELLATION_REASON_LENGTH} characters"
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use BookingStatus::*;

    const CUSTOMER: DbId = 10;
    const PHOTOGRAPHER: DbId = 20;
    const STRANGER: DbId = 99;

    fn parties() -> BookingParties {
        BookingParties {
            customer_id: CUSTOMER,
            photographer_id: PHOTOGRAPHER,
        }
    }

    fn customer() -> Actor {
        Actor::new(CUSTOMER, Role::Customer)
    }

    fn photographer() -> Actor {
        Actor::new(PHOTOGRAPHER, Role::Photographer)
    }

    fn admin() -> Actor {
        Actor::new(1, Role::Admin)
    }

    // -----------------------------------------------------------------------
    // Status ids and names
    // -----------------------------------------------------------------------

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(Pending.id(), 1);
        assert_eq!(Confirmed.id(), 2);
        assert_eq!(InProgress.id(), 3);
        assert_eq!(Completed.id(), 4);
        assert_eq!(Cancelled.id(), 5);
        assert_eq!(Rejected.id(), 6);
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(BookingStatus::from_id(3), Some(InProgress));
        assert_eq!(BookingStatus::from_id(0), None);
        assert_eq!(BookingStatus::from_id(7), None);
    }

    #[test]
    fn parse_accepts_snake_case_names() {
        assert_eq!(BookingStatus::parse("in_progress").unwrap(), InProgress);
        assert_matches!(BookingStatus::parse("done"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serde_name_matches_as_str() {
        let json = serde_json::to_string(&InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }

    #[test]
    fn active_and_terminal_partition_all_statuses() {
        for s in ALL_STATUSES {
            assert_ne!(s.is_active(), s.is_terminal());
        }
        assert!(Pending.is_active());
        assert!(Confirmed.is_active());
        assert!(InProgress.is_active());
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
        assert!(Rejected.is_terminal());
    }

    // -----------------------------------------------------------------------
    // Transition table
    // -----------------------------------------------------------------------

    #[test]
    fn customer_may_only_cancel_pending_or_confirmed() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let expected = matches!((from, to), (Pending | Confirmed, Cancelled));
                assert_eq!(
                    can_transition(Role::Customer, *from, *to),
                    expected,
                    "customer {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn photographer_table_is_exact() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let expected = matches!(
                    (from, to),
                    (Pending, Confirmed)
                        | (Pending, Rejected)
                        | (Confirmed, InProgress)
                        | (Confirmed, Cancelled)
                        | (InProgress, Completed)
                );
                assert_eq!(
                    can_transition(Role::Photographer, *from, *to),
                    expected,
                    "photographer {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn admin_may_set_anything() {
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                assert!(can_transition(Role::Admin, *from, *to));
            }
        }
    }

    #[test]
    fn pending_to_completed_is_forbidden_for_non_admins() {
        assert_matches!(
            authorize_transition(&customer(), &parties(), Pending, Completed),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            authorize_transition(&photographer(), &parties(), Pending, Completed),
            Err(CoreError::Forbidden(_))
        );
        assert!(authorize_transition(&admin(), &parties(), Pending, Completed).is_ok());
    }

    #[test]
    fn customer_cannot_confirm_own_booking() {
        assert_matches!(
            authorize_transition(&customer(), &parties(), Pending, Confirmed),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn customer_can_cancel_own_booking() {
        assert!(authorize_transition(&customer(), &parties(), Pending, Cancelled).is_ok());
    }

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------

    #[test]
    fn ownership_is_checked_before_the_table() {
        let other_customer = Actor::new(STRANGER, Role::Customer);
        let err = authorize_transition(&other_customer, &parties(), Pending, Cancelled)
            .unwrap_err();
        assert!(err.to_string().contains("Not enough permissions"));
    }

    #[test]
    fn photographer_of_record_only() {
        let other = Actor::new(STRANGER, Role::Photographer);
        assert_matches!(
            authorize_transition(&other, &parties(), Pending, Confirmed),
            Err(CoreError::Forbidden(_))
        );
        assert!(authorize_transition(&photographer(), &parties(), Pending, Confirmed).is_ok());
    }

    #[test]
    fn role_must_match_the_party_slot() {
        // The customer's user id with a photographer role is not the photographer of record.
        let confused = Actor::new(CUSTOMER, Role::Photographer);
        assert!(!parties().is_owned_by(&confused));
    }

    #[test]
    fn view_and_edit_allow_parties_and_admin() {
        assert!(authorize_view(&customer(), &parties()).is_ok());
        assert!(authorize_view(&photographer(), &parties()).is_ok());
        assert!(authorize_view(&admin(), &parties()).is_ok());
        assert!(authorize_edit(&customer(), &parties()).is_ok());

        let stranger = Actor::new(STRANGER, Role::Customer);
        assert_matches!(authorize_view(&stranger, &parties()), Err(CoreError::Forbidden(_)));
        assert_matches!(authorize_edit(&stranger, &parties()), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn counterparts_exclude_the_actor() {
        assert_eq!(parties().counterparts_of(CUSTOMER), vec![PHOTOGRAPHER]);
        assert_eq!(parties().counterparts_of(PHOTOGRAPHER), vec![CUSTOMER]);
        assert_eq!(parties().counterparts_of(1), vec![CUSTOMER, PHOTOGRAPHER]);
    }

    // -----------------------------------------------------------------------
    // Field validation
    // -----------------------------------------------------------------------

    #[test]
    fn event_and_combo_types_are_validated() {
        assert!(validate_event_type("wedding").is_ok());
        assert!(validate_event_type("funeral").is_err());
        assert!(validate_combo_type("photo_plus_drone").is_ok());
        assert!(validate_combo_type("drone_only").is_err());
    }

    #[test]
    fn amounts_must_be_sane() {
        assert!(validate_amounts(2.0, 500.0).is_ok());
        assert!(validate_amounts(0.0, 500.0).is_err());
        assert!(validate_amounts(2.0, -1.0).is_err());
        assert!(validate_amounts(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn long_text_is_rejected() {
        let long = "x".repeat(MAX_SPECIAL_REQUESTS_LENGTH + 1);
        assert!(validate_special_requests(Some(&long)).is_err());
        assert!(validate_special_requests(None).is_ok());
        assert!(validate_cancellation_reason(Some("changed plans")).is_ok());
    }

    #[test]
    fn text_limits_count_characters_not_bytes() {
        let kanji = |n: usize| "日".repeat(n);
        let accented = |n: usize| "é".repeat(n);
        assert!(validate_special_requests(Some(&kanji(1_000))).is_ok());
        assert!(validate_special_requests(Some(&kanji(MAX_SPECIAL_REQUESTS_LENGTH))).is_ok());
        assert!(validate_special_requests(Some(&kanji(MAX_SPECIAL_REQUESTS_LENGTH + 1))).is_err());
        assert!(validate_cancellation_reason(Some(&accented(600))).is_ok());
        assert!(validate_cancellation_reason(Some(&accented(MAX_CANCELLATION_REASON_LENGTH))).is_ok());
        let over = accented(MAX_CANCELLATION_REASON_LENGTH + 1);
        assert!(validate_cancellation_reason(Some(&over)).is_err());
    }
}
