//! Role-based access control extractors.
//!
//! Extractors wrap [`AuthUser`] and reject requests whose role does not
//! match with 403 Forbidden. Per-booking ownership is checked in the services,
//! not here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use bookmyshoot_core::error::CoreError;
use bookmyshoot_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `customer` role. Only customers request bookings.
///
/// ```ignore
/// async fn create(RequireCustomer(user): RequireCustomer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCustomer(pub AuthUser);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Customer {
            return Err(AppError::Core(CoreError::Forbidden(
                "Customer role required".into(),
            )));
        }
        Ok(RequireCustomer(user))
    }
}
