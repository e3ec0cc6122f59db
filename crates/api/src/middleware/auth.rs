//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::roles::{Actor, Role};
use bookmyshoot_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the `Authorization: Bearer` header.
///
/// A token whose role claim is not a known role is rejected as 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: Role,
}

impl AuthUser {
    /// The identity passed to services and core authorization checks.
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.role)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role = Role::parse(&claims.role).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Token carries an unknown role".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
