/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be returned directly from Axum handlers and built from
 * lower-level store errors.
 *
 * # Response Format
 *
 * Error responses are returned as JSON:
 * ```json
 * {
 *   "error": "Error message"
 * }
 * ```
 */

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;
use crate::backend::store::StoreError;

impl IntoResponse for ApiError {
    /// Convert a backend error into an HTTP response
    ///
    /// The status comes from `status_code()` and the body is a JSON object
    /// with a single `error` field holding the caller-safe message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let body = serde_json::json!({ "error": message });

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}

impl From<StoreError> for ApiError {
    /// Convert a store error into an API error
    ///
    /// Constraint violations keep their meaning (duplicate username, missing
    /// receipt); anything else is logged here and collapses to `Internal`.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => {
                ApiError::Conflict("Username is already taken.".to_string())
            }
            StoreError::ReceiptMissing => ApiError::NotFound("Receipt not found.".to_string()),
            StoreError::Database(detail) => {
                tracing::error!(error = %detail, "store operation failed");
                ApiError::Internal
            }
        }
    }
}
