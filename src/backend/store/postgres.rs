/**
 * PostgreSQL Store
 *
 * sqlx-backed implementation of the `Store` trait. All invariants the rest
 * of the backend relies on are enforced at the schema level:
 *
 * - `users.username` carries a unique index (duplicate registrations fail
 *   even when two requests race past the service-level check)
 * - `likes (user_id, receipt_id)` is UNIQUE, so the like toggle's
 *   check-then-act cannot produce two rows under concurrent submission
 * - deleting a receipt cascades to its likes
 */

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::auth::users::User;
use crate::backend::receipts::models::{ReceiptDetails, ReceiptMeta, ReceiptSummary};
use crate::backend::store::{Store, StoreError, SEARCH_LIMIT};

/// PostgreSQL-backed store
///
/// Holds the connection pool it was constructed with; cloning is cheap and
/// every method is safe for concurrent use.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, name, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, name, password_hash, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create_receipt(
        &self,
        user_id: i64,
        title: &str,
        image: Vec<u8>,
    ) -> Result<ReceiptMeta, StoreError> {
        let meta = sqlx::query_as::<_, ReceiptMeta>(
            r#"
            INSERT INTO receipts (title, image, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, created_at, user_id
            "#,
        )
        .bind(title)
        .bind(image)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(meta)
    }

    async fn receipt_meta(&self, id: i64) -> Result<Option<ReceiptMeta>, StoreError> {
        let meta = sqlx::query_as::<_, ReceiptMeta>(
            r#"
            SELECT id, title, created_at, user_id
            FROM receipts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(meta)
    }

    async fn receipt_image(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        let image: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT image FROM receipts WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(image.map(|row| row.0))
    }

    async fn receipt_details(&self, id: i64) -> Result<Option<ReceiptDetails>, StoreError> {
        let details = sqlx::query_as::<_, ReceiptDetails>(
            r#"
            SELECT r.id, r.title, r.created_at, r.user_id,
                   u.username AS username,
                   (SELECT COUNT(*) FROM likes l WHERE l.receipt_id = r.id) AS likes_count
            FROM receipts r
            JOIN users u ON u.id = r.user_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    async fn delete_receipt(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM receipts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn toggle_like(&self, user_id: i64, receipt_id: i64) -> Result<bool, StoreError> {
        // Step 1: if the caller already likes this receipt, un-like it.
        let deleted = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND receipt_id = $2")
            .bind(user_id)
            .bind(receipt_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() > 0 {
            return Ok(false);
        }

        // Step 2: insert. The unique (user_id, receipt_id) constraint turns
        // a concurrent duplicate submission into a no-op conflict, and the
        // end state is "liked" either way.
        let insert = sqlx::query(
            r#"
            INSERT INTO likes (user_id, receipt_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, receipt_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(receipt_id)
        .execute(&self.pool)
        .await;

        match insert {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(StoreError::ReceiptMissing)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn search_receipts(
        &self,
        query: &str,
        viewer: Option<i64>,
    ) -> Result<Vec<ReceiptSummary>, StoreError> {
        let rows = sqlx::query_as::<_, ReceiptSummary>(
            r#"
            SELECT r.id, r.title, r.created_at, r.user_id,
                   u.username AS username,
                   (SELECT COUNT(*) FROM likes l WHERE l.receipt_id = r.id) AS likes_count,
                   EXISTS(
                       SELECT 1 FROM likes l
                       WHERE l.receipt_id = r.id AND l.user_id = $2
                   ) AS liked_by_viewer
            FROM receipts r
            JOIN users u ON u.id = r.user_id
            WHERE r.title ILIKE '%' || $1 || '%'
               OR u.name ILIKE '%' || $1 || '%'
            ORDER BY r.created_at DESC
            LIMIT $3
            "#,
        )
        .bind(query)
        .bind(viewer)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
