/**
 * Receipt Handlers
 *
 * Upload (guarded), image serving and details (public), and deletion
 * (guarded, owner-only).
 *
 * # Ownership
 *
 * The creator's account id is taken from the caller identity the guard
 * attached - never from the request body - and written once at upload.
 * Deletion compares the stored creator id against the caller and answers
 * 403 on mismatch, which is distinct from 404 for an unknown receipt.
 */

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::backend::auth::ownership::ensure_owner;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;

/// Response for a successful upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Fixed confirmation message
    pub message: String,
    /// Receipt title as stored
    pub title: String,
    /// Creator's account id
    pub user_id: i64,
    /// Id of the new receipt
    pub receipt_id: i64,
}

/// Public detail view of a receipt
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDetailsResponse {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub user_name: String,
    pub likes_count: i64,
    /// Relative URL of the image endpoint
    pub image_url: String,
}

/// Response for a successful deletion
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Relative URL a receipt's image is served from
pub fn image_url(receipt_id: i64) -> String {
    format!("/api/receipts/{receipt_id}/image")
}

/// Upload handler
///
/// POST /api/receipts (guarded, multipart/form-data)
///
/// Accepts a `title` text field and an `image` file field. The receipt is
/// associated with the caller taken from the validated token.
///
/// # Errors
///
/// * `400 Bad Request` - malformed multipart body, or no file uploaded
/// * `401 Unauthorized` - handled by the guard before this runs
pub async fn upload_receipt(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut title = String::new();
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "malformed multipart body");
        ApiError::Validation("Malformed multipart body.".to_string())
    })? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("title") => {
                title = field.text().await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to read title field");
                    ApiError::Validation("Malformed multipart body.".to_string())
                })?;
            }
            Some("image") => {
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to read image field");
                    ApiError::Validation("Malformed multipart body.".to_string())
                })?;
                image = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| ApiError::Validation("No file uploaded.".to_string()))?;

    let meta = state
        .store
        .create_receipt(caller.user_id, &title, image)
        .await?;

    tracing::info!(
        receipt_id = meta.id,
        user_id = caller.user_id,
        "receipt uploaded"
    );

    Ok(Json(UploadResponse {
        message: "Uploaded successfully".to_string(),
        title: meta.title,
        user_id: caller.user_id,
        receipt_id: meta.id,
    }))
}

/// Image handler
///
/// GET /api/receipts/{id}/image (public)
///
/// Returns the stored image bytes as `image/jpeg`.
pub async fn get_receipt_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let image = state
        .store
        .receipt_image(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Receipt not found.".to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], image).into_response())
}

/// Details handler
///
/// GET /api/receipts/{id} (public)
pub async fn get_receipt_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ReceiptDetailsResponse>, ApiError> {
    let details = state
        .store
        .receipt_details(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Receipt not found.".to_string()))?;

    Ok(Json(ReceiptDetailsResponse {
        image_url: image_url(details.id),
        id: details.id,
        title: details.title,
        created_at: details.created_at,
        user_id: details.user_id,
        user_name: details.username,
        likes_count: details.likes_count,
    }))
}

/// Deletion handler
///
/// DELETE /api/receipts/{id} (guarded, owner-only)
///
/// # Errors
///
/// * `404 Not Found` - unknown receipt id
/// * `403 Forbidden` - the caller is not the creator; the receipt is left
///   untouched
pub async fn delete_receipt(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let meta = state
        .store
        .receipt_meta(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Receipt not found.".to_string()))?;

    ensure_owner(caller.user_id, meta.user_id)?;

    state.store.delete_receipt(id).await?;
    tracing::info!(receipt_id = id, user_id = caller.user_id, "receipt deleted");

    Ok(Json(DeleteResponse {
        message: "Deleted successfully".to_string(),
    }))
}
