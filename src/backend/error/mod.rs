//! Backend Error Module
//!
//! This module defines the error taxonomy used by the backend server and
//! the conversions that turn errors into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs          - Module exports
//! ├── types.rs        - ApiError taxonomy
//! └── conversion.rs   - IntoResponse and From conversions
//! ```
//!
//! # Taxonomy
//!
//! - `Validation` - client-correctable input problems (400)
//! - `Conflict` - duplicate username (400, matching the auth API contract)
//! - `InvalidCredentials` - failed login, one generic message (400)
//! - `Unauthenticated` - missing/invalid/expired bearer token (401)
//! - `Forbidden` - authenticated but not the resource owner (403)
//! - `NotFound` - unknown resource (404)
//! - `Internal` - store or crypto failure; detail stays in the server log (500)

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
