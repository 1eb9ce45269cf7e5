/**
 * User Query Handlers
 *
 * Guarded lookups of account profiles. Only the public fields (username,
 * display name) ever leave the server; the password hash stays in the
 * store.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::users::UserSummary;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Single-user lookup
///
/// GET /api/users/{id} (guarded)
///
/// # Errors
///
/// * `404 Not Found` - unknown account id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserSummary>, ApiError> {
    let user = state
        .store
        .user_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found.".to_string()))?;

    Ok(Json(UserSummary::from(&user)))
}

/// User listing
///
/// GET /api/users (guarded)
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(UserSummary::from).collect()))
}
