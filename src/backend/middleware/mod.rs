//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! The middleware module currently provides:
//!
//! - **`auth`** - The bearer-token guard for protected routes, plus the
//!   `AuthUser` / `OptionalAuthUser` extractors handlers use to receive the
//!   caller identity as an explicit value

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser, OptionalAuthUser};
