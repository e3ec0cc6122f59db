//! BookMyShoot event bus and in-app notifications.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`] -- the domain event envelope.
//! - [`NotificationWriter`] -- background task that turns booking and review
//!   events into rows in the `notifications` table.
//!
//! Publishing never blocks or fails the request that produced the event.

pub mod bus;
pub mod notifier;

pub use bus::{EventBus, PlatformEvent};
pub use notifier::NotificationWriter;
