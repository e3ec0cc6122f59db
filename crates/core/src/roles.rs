//! Actor roles and the authenticated actor identity.
//!
//! Role names must match the `users.role` CHECK constraint in
//! `20250301000001_create_users.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_PHOTOGRAPHER: &str = "photographer";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_PHOTOGRAPHER, ROLE_ADMIN];

/// Role carried by an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Photographer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => ROLE_CUSTOMER,
            Role::Photographer => ROLE_PHOTOGRAPHER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a role name, rejecting anything outside [`VALID_ROLES`].
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_CUSTOMER => Ok(Role::Customer),
            ROLE_PHOTOGRAPHER => Ok(Role::Photographer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_role() {
        for name in VALID_ROLES {
            assert_eq!(Role::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = Role::parse("creator").unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }

    #[test]
    fn only_admin_role_is_admin() {
        assert!(Actor::new(1, Role::Admin).is_admin());
        assert!(!Actor::new(1, Role::Customer).is_admin());
        assert!(!Actor::new(1, Role::Photographer).is_admin());
    }
}
