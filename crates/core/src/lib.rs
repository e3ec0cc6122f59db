//! BookMyShoot domain core.
//!
//! Pure domain logic with zero internal dependencies so it can be shared by
//! the repository layer, the API server, and background tasks:
//!
//! - [`booking`] -- booking statuses, the lifecycle transition table, and
//!   actor authorization.
//! - [`slot`] -- half-open time slots and overlap detection.
//! - [`rating`] -- incremental rating aggregation.
//! - [`review`] -- review input validation.
//! - [`stats`] -- booking statistics windows.

pub mod booking;
pub mod error;
pub mod event_types;
pub mod pagination;
pub mod rating;
pub mod review;
pub mod roles;
pub mod slot;
pub mod stats;
pub mod types;
