//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading and fail-fast validation
//! └── init.rs         - Application assembly
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: environment variables parsed and validated; a
//!    missing or short signing key stops the process before it listens
//! 2. **Store selection**: PostgreSQL (with migrations) or in-memory
//! 3. **Router creation**: public and guarded route groups assembled

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, JwtSettings, ServerConfig};
pub use init::{create_app, create_app_with};
pub use state::AppState;
