//! In-app notification writer.
//!
//! [`NotificationWriter`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and persists a notification for every party affected by a booking or review
//! event, except the user who caused it. Write failures are logged and never
//! reach the request that published the event.

use bookmyshoot_core::booking::{BookingParties, BookingStatus};
use bookmyshoot_core::event_types;
use bookmyshoot_db::models::notification::CreateNotification;
use bookmyshoot_db::repositories::NotificationRepo;
use bookmyshoot_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::PlatformEvent;

/// Background service that writes notifications for platform events.
pub struct NotificationWriter;

impl NotificationWriter {
    /// Run until the bus is dropped.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    for notification in Self::notifications_for(&event) {
                        if let Err(e) = NotificationRepo::create(&pool, &notification).await {
                            tracing::error!(
                                error = %e,
                                event_type = %event.event_type,
                                user_id = notification.user_id,
                                "Failed to write notification"
                            );
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification writer lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification writer shutting down");
                    break;
                }
            }
        }
    }

    /// Notifications implied by one event. Unknown events produce none.
    pub fn notifications_for(event: &PlatformEvent) -> Vec<CreateNotification> {
        match event.event_type.as_str() {
            event_types::BOOKING_CREATED => Self::booking_created(event),
            event_types::BOOKING_STATUS_CHANGED => Self::booking_status_changed(event),
            event_types::BOOKING_UPDATED => Self::booking_updated(event),
            event_types::REVIEW_CREATED => Self::review_created(event),
            _ => Vec::new(),
        }
    }

    fn booking_created(event: &PlatformEvent) -> Vec<CreateNotification> {
        let (Some(booking_id), Some(photographer_id)) =
            (event.source_entity_id, event.payload_id("photographer_id"))
        else {
            return Vec::new();
        };
        vec![booking_notification(
            photographer_id,
            booking_id,
            "New booking request",
            format!("You have a new booking request (#{booking_id})."),
        )]
    }

    fn booking_status_changed(event: &PlatformEvent) -> Vec<CreateNotification> {
        let Some((booking_id, parties)) = booking_parties(event) else {
            return Vec::new();
        };
        let Some(to) = event
            .payload
            .get("to")
            .and_then(|v| serde_json::from_value::<BookingStatus>(v.clone()).ok())
        else {
            return Vec::new();
        };

        let title = format!("Booking {}", status_title(to));
        let message = format!("Booking #{booking_id} is now {to}.");
        counterparts(event, parties)
            .into_iter()
            .map(|user_id| booking_notification(user_id, booking_id, &title, message.clone()))
            .collect()
    }

    fn booking_updated(event: &PlatformEvent) -> Vec<CreateNotification> {
        let Some((booking_id, parties)) = booking_parties(event) else {
            return Vec::new();
        };
        counterparts(event, parties)
            .into_iter()
            .map(|user_id| {
                booking_notification(
                    user_id,
                    booking_id,
                    "Booking updated",
                    format!("The details of booking #{booking_id} were changed."),
                )
            })
            .collect()
    }

    fn review_created(event: &PlatformEvent) -> Vec<CreateNotification> {
        let (Some(review_id), Some(photographer_id)) =
            (event.source_entity_id, event.payload_id("photographer_id"))
        else {
            return Vec::new();
        };
        let rating = event.payload.get("rating").and_then(|v| v.as_i64()).unwrap_or(0);
        vec![CreateNotification {
            user_id: photographer_id,
            title: "New review".into(),
            message: format!("You received a {rating}-star review."),
            notification_type: event_types::NOTIFICATION_TYPE_REVIEW.into(),
            related_entity_type: Some(event_types::ENTITY_REVIEW.into()),
            related_entity_id: Some(review_id),
        }]
    }
}

fn booking_parties(event: &PlatformEvent) -> Option<(i64, BookingParties)> {
    Some((
        event.source_entity_id?,
        BookingParties {
            customer_id: event.payload_id("customer_id")?,
            photographer_id: event.payload_id("photographer_id")?,
        },
    ))
}

fn counterparts(event: &PlatformEvent, parties: BookingParties) -> Vec<i64> {
    match event.actor_user_id {
        Some(actor) => parties.counterparts_of(actor),
        None => vec![parties.customer_id, parties.photographer_id],
    }
}

fn status_title(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::InProgress => "in progress",
        BookingStatus::Completed => "completed",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Rejected => "rejected",
    }
}

fn booking_notification(
    user_id: i64,
    booking_id: i64,
    title: &str,
    message: String,
) -> CreateNotification {
    CreateNotification {
        user_id,
        title: title.to_string(),
        message,
        notification_type: event_types::NOTIFICATION_TYPE_BOOKING.into(),
        related_entity_type: Some(event_types::ENTITY_BOOKING.into()),
        related_entity_id: Some(booking_id),
    }
}
