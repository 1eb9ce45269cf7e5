/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container:
 * - `store` - the storage backend (PostgreSQL in production, in-memory in
 *   development and tests), injected at startup
 * - `tokens` - the JWT issuer/validator, built once from validated
 *   configuration and immutable afterwards
 *
 * # Thread Safety
 *
 * Both fields are `Arc`s over types that are safe for concurrent use; the
 * token material is read-only after startup and needs no locking.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::sessions::Tokens;
use crate::backend::store::Store;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn Store>,

    /// Token issuer/validator (immutable after startup)
    pub tokens: Arc<Tokens>,
}

/// Allow handlers to extract the store directly
impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

/// Allow handlers to extract the token service directly
impl FromRef<AppState> for Arc<Tokens> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
