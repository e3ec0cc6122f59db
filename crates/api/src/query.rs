//! Shared query parameter types for API handlers.
//!
//! Values are clamped with `bookmyshoot_core::pagination` before they reach
//! a repository.

use serde::Deserialize;

/// `?limit=` only, for bounded top-N queries.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
