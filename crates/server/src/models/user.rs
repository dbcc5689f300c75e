//! User account model.

use bookbuddy_core::{AccountStatus, Email, UserId, UserRole};
use chrono::{DateTime, Utc};

/// A user account row.
///
/// Not serialized directly; route responses pick the public fields so the
/// password hash and counters never leak into a payload.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub password_hash: String,
    pub role: UserRole,
    pub status: AccountStatus,
    pub failed_login_attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account is allowed to authenticate.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active)
    }
}
