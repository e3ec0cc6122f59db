//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and generation, for tooling and tests).

pub mod jwt;
