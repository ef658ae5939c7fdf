//! Capability checks for the back office and customer-facing operations.
//!
//! There is no ambient "current user": every operation that needs an identity
//! takes one explicitly. Two checks exist, not a role hierarchy: authenticated
//! (an identity is present) and admin (a boolean flag on that identity).

use thiserror::Error;

use crate::domain::User;

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("please log in to access this page")]
    Unauthorized,
    #[error("you need admin privileges to access this page")]
    Forbidden,
}

/// Require an authenticated identity.
pub fn require_auth(identity: Option<&Identity>) -> Result<&Identity, AccessError> {
    identity.ok_or(AccessError::Unauthorized)
}

/// Require an authenticated admin. Authentication is checked before the
/// capability flag, so a missing session never reports `Forbidden`.
pub fn require_admin(identity: Option<&Identity>) -> Result<&Identity, AccessError> {
    let identity = require_auth(identity)?;
    if identity.is_admin {
        Ok(identity)
    } else {
        Err(AccessError::Forbidden)
    }
}

/// Password hashing seam. The actual KDF is an external collaborator; this
/// trait is what the user operations program against.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, raw: &str) -> String;
    fn verify(&self, raw: &str, hash: &str) -> bool;
}

/// Reversible stand-in hasher for demos and tests. Not a real KDF.
pub struct InsecureHasher;

impl PasswordHasher for InsecureHasher {
    fn hash(&self, raw: &str) -> String {
        format!("plain${raw}")
    }

    fn verify(&self, raw: &str, hash: &str) -> bool {
        hash == format!("plain${raw}")
    }
}
