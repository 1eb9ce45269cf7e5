/**
 * Like Toggle Handler
 *
 * POST /api/likes/{receipt_id} (guarded)
 *
 * One request toggles the caller's like on a receipt: an existing like is
 * removed, a missing one is created. The check-then-act runs atomically in
 * the store, with the unique (user, receipt) constraint as the backstop,
 * so concurrent double-submissions can never produce two like rows.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Toggle outcome
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    /// Whether the caller likes the receipt after this request
    pub liked: bool,
}

/// Like-toggle handler
///
/// # Errors
///
/// * `404 Not Found` - unknown receipt id; the store reports it as a
///   constraint failure, so the check holds even when the receipt is
///   deleted while this request is in flight
pub async fn toggle_like(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(receipt_id): Path<i64>,
) -> Result<Json<LikeResponse>, ApiError> {
    let liked = state.store.toggle_like(caller.user_id, receipt_id).await?;

    tracing::info!(
        receipt_id,
        user_id = caller.user_id,
        liked,
        "like toggled"
    );

    Ok(Json(LikeResponse { liked }))
}
