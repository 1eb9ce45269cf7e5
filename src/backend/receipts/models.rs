/**
 * Receipt Models
 *
 * Storage-level receipt records. The creator's account id is written once
 * at upload time and never changes; ownership checks compare against it.
 */

use chrono::{DateTime, Utc};

/// Receipt metadata without the image payload
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReceiptMeta {
    /// Unique receipt id
    pub id: i64,
    /// Receipt title
    pub title: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Creator's account id (immutable)
    pub user_id: i64,
}

/// Receipt details for the public detail view
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReceiptDetails {
    /// Unique receipt id
    pub id: i64,
    /// Receipt title
    pub title: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Creator's account id
    pub user_id: i64,
    /// Creator's username
    pub username: String,
    /// Number of likes
    pub likes_count: i64,
}

/// Search result row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReceiptSummary {
    /// Unique receipt id
    pub id: i64,
    /// Receipt title
    pub title: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Creator's account id
    pub user_id: i64,
    /// Creator's username
    pub username: String,
    /// Number of likes
    pub likes_count: i64,
    /// Whether the requesting user has liked this receipt
    /// (always false for anonymous callers)
    pub liked_by_viewer: bool,
}
