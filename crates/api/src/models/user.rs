//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{Email, Role, UserId};

/// A store account.
///
/// Guests (created during guest checkout) have no username or password;
/// activation promotes them to customers. The password hash never leaves the
/// repository layer.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Optional unique username (absent for guests).
    pub username: Option<String>,
    /// User's email address (unique).
    pub email: Email,
    /// Account role.
    pub role: Role,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Whether this account holds the administrative role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
