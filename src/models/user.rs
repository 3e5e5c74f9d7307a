//! System user model.

use serde::{Deserialize, Serialize};

/// Identifier assigned to a system user.
pub type UserId = u64;

/// An account able to log in to the ledger.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Argon2id PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The role carried in the session token after login.
    pub role: String,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user.
    pub user_id: UserId,
    /// The user's role.
    pub role: String,
}
