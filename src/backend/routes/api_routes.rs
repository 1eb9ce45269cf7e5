/**
 * API Route Handlers
 *
 * This module registers the API endpoints on the public and protected
 * routers.
 *
 * # Routes
 *
 * ## Public (no token required)
 * - `POST /api/auth/register` - account creation
 * - `POST /api/auth/login` - credential check
 * - `GET /api/receipts/{id}` - receipt details
 * - `GET /api/receipts/{id}/image` - receipt image
 * - `GET /api/search` - receipt search (personalized when a token is sent)
 *
 * ## Protected (`Authorization: Bearer <token>` required)
 * - `GET /api/hello` - minimal guarded probe
 * - `POST /api/receipts` - receipt upload
 * - `DELETE /api/receipts/{id}` - owner-only deletion
 * - `POST /api/likes/{receipt_id}` - like toggle
 * - `GET /api/users` / `GET /api/users/{id}` - user queries
 *
 * Public routes are public by registration here, never by inference; the
 * guard middleware wraps the protected router as a whole.
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::likes::toggle_like;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::receipts::{
    delete_receipt, get_receipt_details, get_receipt_image, upload_receipt,
};
use crate::backend::search::search_receipts;
use crate::backend::server::state::AppState;
use crate::backend::users::{get_user, list_users};

/// Guarded probe endpoint
///
/// GET /api/hello - the smallest route behind the guard; echoes the caller
/// identity the middleware attached.
pub async fn hello(AuthUser(caller): AuthUser) -> String {
    format!("Hello, {}!", caller.username)
}

/// Register the public API routes
///
/// These routes skip the bearer guard entirely: registration and login
/// have no token yet, and receipt reads/search accept anonymous callers.
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/receipts/{id}", get(get_receipt_details))
        .route("/api/receipts/{id}/image", get(get_receipt_image))
        .route("/api/search", get(search_receipts))
}

/// Register the protected API routes
///
/// The caller identity is available to every handler here; the guard has
/// already rejected requests without a valid token.
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/hello", get(hello))
        .route("/api/receipts", post(upload_receipt))
        .route("/api/receipts/{id}", delete(delete_receipt))
        .route("/api/likes/{receipt_id}", post(toggle_like))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user))
}
