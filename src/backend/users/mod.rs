//! Users Module
//!
//! Guarded lookups of account profiles (username and display name only).

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_user, list_users};
