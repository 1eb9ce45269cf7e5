/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * # Registration Process
 *
 * 1. Normalize and validate the username (3-30 chars, `[a-z0-9._]`)
 * 2. Validate the password shape
 * 3. Reject duplicate usernames (case-insensitive)
 * 4. Hash the password with bcrypt and create the account
 * 5. Issue a JWT and return it with its expiry
 *
 * All rules live in the identity service; this handler only adapts HTTP.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::service::{AuthService, Session};
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid username/password shape, or the username
///   is already taken
/// * `500 Internal Server Error` - hashing, storage, or signing failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<Session>, ApiError> {
    tracing::info!(username = %request.username, "registration request");

    let service = AuthService::new(state.store.clone(), state.tokens.clone());
    let session = service
        .register(&request.username, &request.name, &request.password)
        .await?;

    Ok(Json(session))
}
