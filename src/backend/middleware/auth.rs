/**
 * Authentication Middleware
 *
 * The bearer-token guard for protected routes. It extracts the token from
 * the Authorization header, validates it, and attaches the caller identity
 * to the request so handlers receive it as an explicit value.
 *
 * A request is either Authenticated (identity attached, handler runs) or
 * Rejected (401, handler never runs). Public routes skip this stage
 * entirely by route registration; exemption is never inferred.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authenticated caller identity derived from a validated token
///
/// Request-scoped: created by the middleware, dropped with the request.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    /// Account id (the token's `sub` claim)
    pub user_id: i64,
    /// Normalized username
    pub username: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies signature, issuer, audience, and lifetime
/// 3. Attaches [`AuthenticatedUser`] to the request extensions
///
/// Returns 401 when the token is missing or invalid. The specific failure
/// reason is logged server-side and never sent to the client.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("missing or malformed Authorization header");
        ApiError::Unauthenticated
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::warn!(error = %e, "bearer token rejected");
        ApiError::Unauthenticated
    })?;

    let user_id = claims.account_id().ok_or_else(|| {
        tracing::error!(sub = %claims.sub, "token subject is not an account id");
        ApiError::Unauthenticated
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Extract the token from a `Bearer <token>` Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Axum extractor for the authenticated caller
///
/// Used as a handler parameter on guarded routes; the middleware has
/// already validated the token, so extraction only reads the identity the
/// guard attached.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

/// Optional-identity extractor for public routes
///
/// Public reads like search accept anonymous callers but personalize the
/// response when a valid token is present. An absent or invalid token
/// degrades to `None` instead of rejecting the request.
#[derive(Clone, Debug)]
pub struct OptionalAuthUser(pub Option<AuthenticatedUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(OptionalAuthUser(None));
        };

        let identity = state
            .tokens
            .verify(token)
            .ok()
            .and_then(|claims| {
                claims.account_id().map(|user_id| AuthenticatedUser {
                    user_id,
                    username: claims.username,
                })
            });

        Ok(OptionalAuthUser(identity))
    }
}
