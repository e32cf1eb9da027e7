//! Ownership rules for budgets, expenses, and notifications.

use serde::{Deserialize, Serialize};
use spendwatch_shared::Claims;
use spendwatch_shared::auth::ADMIN_ROLE;
use spendwatch_shared::types::UserId;
use thiserror::Error;

/// Role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular account holder.
    User,
    /// May read and change any user's budgets and expenses.
    Admin,
}

impl Role {
    /// Parse the role string carried in a token. Unknown roles get no extra rights.
    #[must_use]
    pub fn from_claim(role: &str) -> Self {
        if role == ADMIN_ROLE {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/// The caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    /// Authenticated user.
    pub user_id: UserId,
    /// Caller's role.
    pub role: Role,
}

impl Requester {
    /// Create a requester.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// A regular user.
    #[must_use]
    pub const fn user(user_id: UserId) -> Self {
        Self::new(user_id, Role::User)
    }

    /// Whether the caller is an administrator.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Allow the owner or an administrator.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` for anyone else.
    pub fn ensure_owner_or_admin(&self, owner: UserId) -> Result<(), AccessError> {
        if self.user_id == owner || self.is_admin() {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }

    /// Allow the owner only. Administrators get no exemption.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Forbidden` for anyone but the owner.
    pub fn ensure_owner(&self, owner: UserId) -> Result<(), AccessError> {
        if self.user_id == owner {
            Ok(())
        } else {
            Err(AccessError::Forbidden)
        }
    }
}

impl From<&Claims> for Requester {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.user_id(), Role::from_claim(&claims.role))
    }
}

/// Access check failures. Missing records and foreign records stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The record does not exist.
    #[error("Record not found")]
    NotFound,
    /// The record exists but the caller may not touch it.
    #[error("You do not have access to this record")]
    Forbidden,
}
