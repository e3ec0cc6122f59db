//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is patchable

pub mod booking;
pub mod notification;
pub mod photographer;
pub mod review;
pub mod user;
