//! Backend Module
//!
//! This module contains all server-side code for the Receiptshare API.
//! It provides a complete Axum HTTP server with JWT bearer authentication,
//! per-resource ownership checks, and PostgreSQL persistence.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - Registration and login with bcrypt-hashed credentials
//! - JWT token issuance and validation (issuer, audience, expiry, skew)
//! - Bearer-token middleware guarding protected routes
//! - Receipt upload, image serving, details, and owner-only deletion
//! - Atomic like toggling with a store-level uniqueness backstop
//! - Public search with optional per-caller personalization
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Passwords, JWT sessions, the identity service, ownership
//! - **`middleware`** - Bearer-token authorization guard
//! - **`receipts`** - Receipt upload/serving/deletion handlers
//! - **`likes`** - Like-toggle handler
//! - **`search`** - Public receipt search
//! - **`users`** - User lookup and listing
//! - **`store`** - Storage trait with PostgreSQL and in-memory backends
//! - **`error`** - Backend error taxonomy and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Identity core (passwords, tokens, service, ownership)
//! ├── middleware/     - Bearer-token guard
//! ├── receipts/       - Receipt handlers
//! ├── likes/          - Like toggling
//! ├── search/         - Search handler
//! ├── users/          - User queries
//! ├── store/          - Storage backends
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend uses shared state (`AppState`) that contains:
//! - The storage backend (`Arc<dyn Store>`)
//! - The token issuer/validator (`Arc<Tokens>`, immutable after startup)
//!
//! There is no other shared mutable in-process state; each request runs on
//! its own task and reaches storage through the connection pool (or the
//! lock-guarded in-memory store in development mode).
//!
//! # Error Handling
//!
//! Handlers return `Result<_, ApiError>`. Each error kind maps to a fixed
//! HTTP status and a caller-safe message; internal causes are logged
//! server-side and never sent to the client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication, tokens, and ownership
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Receipt upload, serving, and deletion
pub mod receipts;

/// Like toggling
pub mod likes;

/// Receipt search
pub mod search;

/// User lookup and listing
pub mod users;

/// Storage trait and backends
pub mod store;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::init::{create_app, create_app_with};
pub use server::state::AppState;
