/**
 * Server Initialization
 *
 * This module builds the Axum application: it selects the storage backend,
 * constructs the token service from validated configuration, and assembles
 * the router.
 *
 * # Initialization Process
 *
 * 1. Pick the store: PostgreSQL when `DATABASE_URL` is set (connect + run
 *    migrations, any failure is fatal), the in-memory store otherwise
 * 2. Build the token issuer/validator from the validated JWT settings
 * 3. Create `AppState` and the router
 *
 * Configuration validation happened before this runs; by the time the
 * listener binds, every request-path dependency is ready.
 */

use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;

use crate::backend::auth::sessions::Tokens;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ConfigError, JwtSettings, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{MemoryStore, PgStore, Store};

/// Create the Axum application from validated configuration
///
/// # Errors
///
/// Fails when `DATABASE_URL` is set but the database is unreachable or
/// migrations cannot be applied; the caller exits. An unset `DATABASE_URL`
/// selects the in-memory store instead - a development convenience, loudly
/// logged, never silent.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, ConfigError> {
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            tracing::info!("connecting to database");
            let pool = PgPool::connect(url)
                .await
                .map_err(|e| ConfigError::Database(e.to_string()))?;

            tracing::info!("running database migrations");
            sqlx::migrate!()
                .run(&pool)
                .await
                .map_err(|e| ConfigError::Database(e.to_string()))?;

            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; using the in-memory store (data is lost on shutdown)"
            );
            Arc::new(MemoryStore::new())
        }
    };

    Ok(create_app_with(store, &config.jwt))
}

/// Create the Axum application over an injected store
///
/// Used by [`create_app`] and directly by the test suite, which supplies
/// the in-memory store and its own settings instead of reading the
/// environment.
pub fn create_app_with(store: Arc<dyn Store>, jwt: &JwtSettings) -> Router<()> {
    let tokens = Arc::new(Tokens::new(jwt));
    let state = AppState { store, tokens };
    create_router(state)
}
