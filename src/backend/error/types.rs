/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the backend server. Every
 * handler returns `Result<_, ApiError>`, and each variant maps to a fixed
 * HTTP status code and a caller-safe message.
 *
 * # Error Categories
 *
 * - `Validation` - malformed input (username shape, password shape, bad
 *   multipart body); the message tells the client what to fix
 * - `Conflict` - a username that is already taken
 * - `InvalidCredentials` - failed login; deliberately one generic message
 *   for "no such user" and "wrong password" so usernames cannot be probed
 * - `Unauthenticated` - missing, malformed, expired, or forged bearer
 *   token; the specific reason is logged server-side only
 * - `Forbidden` - the caller is authenticated but does not own the resource
 * - `NotFound` - the resource does not exist
 * - `Internal` - storage or crypto failure; the cause is logged at the
 *   point of failure and never included in the response
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant carries at most a caller-safe message. Internal causes
/// (database errors, hash corruption) are logged where they occur and
/// collapse to `Internal` here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input (e.g., invalid username or password shape)
    #[error("{0}")]
    Validation(String),

    /// Duplicate username at registration
    #[error("{0}")]
    Conflict(String),

    /// Failed login; identical message for unknown user and wrong password
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// Missing, malformed, expired, or forged bearer token
    #[error("Invalid or missing access token.")]
    Unauthenticated,

    /// Authenticated caller is not the owner of the resource
    #[error("You do not have permission to modify this resource.")]
    Forbidden,

    /// Unknown resource
    #[error("{0}")]
    NotFound(String),

    /// Storage or crypto failure; detail lives in the server log
    #[error("Internal server error.")]
    Internal,
}

impl ApiError {
    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `Conflict`, `InvalidCredentials` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the caller-safe error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
