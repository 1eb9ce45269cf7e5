//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Handler exports
//! ├── types.rs     - Request types
//! ├── register.rs  - Registration handler
//! └── login.rs     - Login handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - account creation
//! - **`login`** - POST /api/auth/login - credential check
//!
//! Both return `{accessToken, expiresAt, username, name}` on success and a
//! `400 {error}` body on failure. Neither sits behind the bearer guard -
//! there is no token yet.

/// Request types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

// Re-export commonly used types and handlers
pub use login::login;
pub use register::register;
pub use types::{LoginRequest, RegisterRequest};
