//! Role check applied after a token has been verified.

use crate::services::token_service::{AuthError, Claims};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Roles that `POST /login` will issue tokens for.
pub const KNOWN_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER];

/// Roles allowed to modify the collection.
pub const WRITE_ROLES: &[&str] = &[ROLE_ADMIN];

/// Succeeds when `claims` exist and carry one of the `allowed` roles.
pub fn authorize(claims: Option<&Claims>, allowed: &[&str]) -> Result<(), AuthError> {
    match claims {
        Some(c) if allowed.contains(&c.role.as_str()) => Ok(()),
        other => Err(AuthError::Forbidden {
            role: other.map(|c| c.role.clone()),
        }),
    }
}

pub fn is_known_role(role: &str) -> bool {
    KNOWN_ROLES.contains(&role)
}
