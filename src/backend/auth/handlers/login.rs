/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Normalize the username and look up the account
 * 2. Verify the password against the stored bcrypt hash
 * 3. Issue a JWT and return it with its expiry
 *
 * # Security Notes
 *
 * - An unknown username and a wrong password produce the same response
 * - Password verification is constant-time (bcrypt)
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::LoginRequest;
use crate::backend::auth::service::{AuthService, Session};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - bad credentials (one generic message for unknown
///   user and wrong password)
/// * `500 Internal Server Error` - storage or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, ApiError> {
    tracing::info!(username = %request.username, "login request");

    let service = AuthService::new(state.store.clone(), state.tokens.clone());
    let session = service.login(&request.username, &request.password).await?;

    Ok(Json(session))
}
