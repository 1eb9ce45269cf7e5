/**
 * User Model
 *
 * The account record: a unique normalized username, a display name, and the
 * bcrypt password hash. The plaintext password never appears here or
 * anywhere else in the system.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User struct representing an account in the store
///
/// `username` is always stored normalized (trimmed, lowercased); the store
/// enforces case-insensitive uniqueness over it. `password_hash` is an
/// opaque bcrypt blob and is never serialized into responses.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique account id
    pub id: i64,
    /// Normalized username (unique, 3-30 chars, `[a-z0-9._]`)
    pub username: String,
    /// Display name
    pub name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// Normalized username
    pub username: String,
    /// Display name
    pub name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}
