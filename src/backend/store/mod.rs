//! Storage Module
//!
//! This module defines the storage abstraction the rest of the backend is
//! built against, plus its two implementations.
//!
//! # Architecture
//!
//! The [`Store`] trait is the single seam between handlers/services and
//! persistence. Every component receives an `Arc<dyn Store>` at
//! construction - there is no global database handle. This keeps the
//! identity core testable without a running database and lets the server
//! fall back to the in-memory backend in development.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs          - Store trait and StoreError
//! ├── postgres.rs     - PgStore (sqlx / PostgreSQL)
//! └── memory.rs       - MemoryStore (development and tests)
//! ```
//!
//! # Invariants both backends uphold
//!
//! - Usernames are unique case-insensitively (rows are stored normalized and
//!   duplicate inserts fail with [`StoreError::DuplicateUsername`]).
//! - At most one like exists per `(user, receipt)` pair, even under
//!   concurrent toggles.
//! - Deleting a receipt removes its likes.

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::auth::users::User;
use crate::backend::receipts::models::{ReceiptDetails, ReceiptMeta, ReceiptSummary};

/// PostgreSQL-backed store
pub mod postgres;

/// In-memory store for development and tests
pub mod memory;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Maximum number of rows a search returns.
pub const SEARCH_LIMIT: i64 = 50;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The normalized username is already registered
    #[error("username is already taken")]
    DuplicateUsername,

    /// The referenced receipt does not exist
    #[error("receipt does not exist")]
    ReceiptMissing,

    /// Any other backend failure; the message is for the server log only
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Storage operations used by the backend
///
/// Implementations must be safe for concurrent use; every method takes
/// `&self` and handlers call them from independent request tasks.
#[async_trait]
pub trait Store: Send + Sync {
    // -- users ------------------------------------------------------------

    /// Create an account. `username` must already be normalized.
    ///
    /// Fails with [`StoreError::DuplicateUsername`] when the username is
    /// taken; the underlying uniqueness constraint is the backstop against
    /// double-creation on retried registrations.
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;

    /// Look up an account by normalized username.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Look up an account by id.
    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// List all accounts, oldest first.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    // -- receipts ---------------------------------------------------------

    /// Store a receipt for `user_id` and return its metadata.
    async fn create_receipt(
        &self,
        user_id: i64,
        title: &str,
        image: Vec<u8>,
    ) -> Result<ReceiptMeta, StoreError>;

    /// Fetch receipt metadata (no image payload).
    async fn receipt_meta(&self, id: i64) -> Result<Option<ReceiptMeta>, StoreError>;

    /// Fetch the raw image bytes of a receipt.
    async fn receipt_image(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError>;

    /// Fetch the public detail view of a receipt.
    async fn receipt_details(&self, id: i64) -> Result<Option<ReceiptDetails>, StoreError>;

    /// Delete a receipt (and, via cascade, its likes).
    ///
    /// Returns `false` when the receipt was already gone.
    async fn delete_receipt(&self, id: i64) -> Result<bool, StoreError>;

    // -- likes ------------------------------------------------------------

    /// Toggle the caller's like on a receipt.
    ///
    /// One atomic check-then-act per request: an existing like is removed
    /// (`Ok(false)`), otherwise one is inserted (`Ok(true)`). Concurrent
    /// double-submissions are resolved by the uniqueness backstop on
    /// `(user_id, receipt_id)` - at most one row ever survives.
    async fn toggle_like(&self, user_id: i64, receipt_id: i64) -> Result<bool, StoreError>;

    // -- search -----------------------------------------------------------

    /// Case-insensitive search over receipt titles and creator names,
    /// newest first, capped at [`SEARCH_LIMIT`] rows. `viewer` personalizes
    /// `liked_by_viewer`; `None` (anonymous) yields `false` throughout.
    async fn search_receipts(
        &self,
        query: &str,
        viewer: Option<i64>,
    ) -> Result<Vec<ReceiptSummary>, StoreError>;
}
