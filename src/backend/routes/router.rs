/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines the
 * public and protected route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public routes (auth, receipt reads, search) - no guard
 * 2. Protected routes - wrapped in the bearer-token middleware
 * 3. CORS (allow-all) and request tracing layers
 * 4. Fallback handler (404)
 *
 * The guard is applied with `route_layer` on the protected group only, so
 * a missing token on a public route never produces a spurious 401, and a
 * protected route can never be reached without passing the guard.
 */

use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::middleware::auth::auth_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (store and token service)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = configure_public_routes(Router::new());

    let protected = configure_protected_routes(Router::new()).route_layer(
        middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    // Allow-all CORS, same policy the browser clients rely on.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" })
        .with_state(app_state)
}
