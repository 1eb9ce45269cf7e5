//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Public/protected route registration
//! ```
//!
//! # Route Organization
//!
//! Routes are split into two groups at registration time:
//!
//! 1. **Public routes** - registration, login, receipt reads, search
//! 2. **Protected routes** - everything mutating plus user queries, wrapped
//!    in the bearer-token guard
//!
//! Whether a route is guarded is decided here and nowhere else.

/// Main router creation
pub mod router;

/// API endpoint registration
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
