use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// None of these are retried inside the core. `Conflict` is the only variant
/// callers are expected to retry, after reloading fresh state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    /// An active booking already occupies (part of) the requested slot.
    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    /// Lost a race against a concurrent writer on the same record.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
