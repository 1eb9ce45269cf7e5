/**
 * Authentication Handler Types
 *
 * Request types for the authentication endpoints. The success response is
 * the `Session` struct from the identity service, serialized as
 * `{accessToken, expiresAt, username, name}`.
 */

use serde::Deserialize;

/// Registration request
///
/// Contains the username, display name, and password for a new account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username (normalized to lowercase before storage)
    pub username: String,
    /// Display name
    pub name: String,
    /// Password (hashed before storage, never echoed back)
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username (matched case-insensitively)
    pub username: String,
    /// Password (verified against the stored hash)
    pub password: String,
}
