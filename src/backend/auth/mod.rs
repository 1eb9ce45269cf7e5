//! Authentication Module
//!
//! The identity and authorization core: password handling, JWT sessions,
//! the registration/login service, and the ownership policy applied by
//! mutating handlers.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - Account record and public user view
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - JWT issuance and validation
//! - **`service`** - Registration and login orchestration
//! - **`ownership`** - Creator-only mutation policy
//! - **`handlers`** - HTTP handlers for the auth endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Account record
//! ├── password.rs     - Password hashing
//! ├── sessions.rs     - JWT tokens
//! ├── service.rs      - Identity service
//! ├── ownership.rs    - Ownership policy
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request types
//!     ├── register.rs - Registration handler
//!     └── login.rs    - Login handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: credentials validated → account created → JWT returned
//! 2. **Login**: credentials verified → JWT returned
//! 3. **Guarded request**: bearer token validated by the middleware →
//!    caller identity attached to the request → handler applies the
//!    ownership policy where it mutates
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage and never logged
//! - Tokens are signed (HS256), carry issuer/audience/expiry, and are
//!   validated with a 30-second clock-skew tolerance
//! - Failed logins return one generic error (no username enumeration)
//! - There is no revocation list; short token lifetime is the mitigation

/// Account record
pub mod users;

/// Password hashing and verification
pub mod password;

/// JWT token issuance and validation
pub mod sessions;

/// Registration and login orchestration
pub mod service;

/// Creator-only mutation policy
pub mod ownership;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{login, register, LoginRequest, RegisterRequest};
pub use ownership::{can_modify, ensure_owner};
pub use service::{AuthService, Session};
pub use sessions::{Claims, Tokens};
pub use users::{User, UserSummary};
