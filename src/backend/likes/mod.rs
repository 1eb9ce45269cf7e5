//! Likes Module
//!
//! The like toggle: one guarded endpoint flipping the caller's like on a
//! receipt, with store-level protection against duplicate rows.

/// HTTP handlers
pub mod handlers;

pub use handlers::toggle_like;
