//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! Shared as `Arc<EventBus>` through the API state. Publishing is
//! fire-and-forget: a full buffer drops the oldest events for slow receivers
//! and a bus with no receivers drops everything.

use bookmyshoot_core::booking::{BookingParties, BookingStatus};
use bookmyshoot_core::event_types;
use bookmyshoot_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dotted event name, one of [`bookmyshoot_core::event_types`].
    pub event_type: String,

    pub source_entity_type: Option<String>,
    pub source_entity_id: Option<DbId>,

    /// User that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: Timestamp,
}

impl PlatformEvent {
    /// Create a bare event; optional fields start empty.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// `booking.created`, raised by the customer who requested the booking.
    pub fn booking_created(booking_id: DbId, parties: BookingParties) -> Self {
        Self::new(event_types::BOOKING_CREATED)
            .with_source(event_types::ENTITY_BOOKING, booking_id)
            .with_actor(parties.customer_id)
            .with_payload(serde_json::json!({
                "customer_id": parties.customer_id,
                "photographer_id": parties.photographer_id,
            }))
    }

    /// `booking.status_changed` from `from` to `to`, raised by `actor_user_id`.
    pub fn booking_status_changed(
        booking_id: DbId,
        parties: BookingParties,
        from: BookingStatus,
        to: BookingStatus,
        actor_user_id: DbId,
    ) -> Self {
        Self::new(event_types::BOOKING_STATUS_CHANGED)
            .with_source(event_types::ENTITY_BOOKING, booking_id)
            .with_actor(actor_user_id)
            .with_payload(serde_json::json!({
                "customer_id": parties.customer_id,
                "photographer_id": parties.photographer_id,
                "from": from,
                "to": to,
            }))
    }

    /// `booking.updated` after a details patch.
    pub fn booking_updated(booking_id: DbId, parties: BookingParties, actor_user_id: DbId) -> Self {
        Self::new(event_types::BOOKING_UPDATED)
            .with_source(event_types::ENTITY_BOOKING, booking_id)
            .with_actor(actor_user_id)
            .with_payload(serde_json::json!({
                "customer_id": parties.customer_id,
                "photographer_id": parties.photographer_id,
            }))
    }

    /// `review.created` for `photographer_id`.
    pub fn review_created(
        review_id: DbId,
        photographer_id: DbId,
        reviewer_id: DbId,
        rating: i16,
    ) -> Self {
        Self::new(event_types::REVIEW_CREATED)
            .with_source(event_types::ENTITY_REVIEW, review_id)
            .with_actor(reviewer_id)
            .with_payload(serde_json::json!({
                "photographer_id": photographer_id,
                "rating": rating,
            }))
    }

    /// Read an id field from the payload.
    pub fn payload_id(&self, key: &str) -> Option<DbId> {
        self.payload.get(key).and_then(serde_json::Value::as_i64)
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers.
    pub fn publish(&self, event: PlatformEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Event published with no subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
