//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the actor behind a JWT Bearer token.
//! - [`rbac::RequireCustomer`] -- requires the `customer` role.

pub mod auth;
pub mod rbac;
