//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or an open transaction) as the first argument.

pub mod booking_repo;
pub mod notification_repo;
pub mod photographer_repo;
pub mod review_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use notification_repo::NotificationRepo;
pub use photographer_repo::PhotographerRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
