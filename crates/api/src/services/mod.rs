//! Orchestration between the HTTP handlers and the repositories.
//!
//! Services own authorization, validation, cross-repository transactions,
//! and event publication. Handlers stay thin.

pub mod booking;
pub mod review;
