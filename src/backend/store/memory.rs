/**
 * In-Memory Store
 *
 * A lock-guarded implementation of the `Store` trait. Used by the test
 * suite and as the fallback backend when `DATABASE_URL` is unset, so the
 * server can run without a database during development. All data is lost
 * on shutdown.
 *
 * The backstops the PostgreSQL schema provides are mirrored here:
 * username uniqueness is checked inside the insert's critical section, and
 * likes live in a set keyed by `(user_id, receipt_id)`, so a duplicate
 * like cannot exist. The like toggle takes the lock once per step
 * (delete-if-present, then insert-if-absent), matching the two-statement
 * shape of the SQL backend.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::backend::auth::users::User;
use crate::backend::receipts::models::{ReceiptDetails, ReceiptMeta, ReceiptSummary};
use crate::backend::store::{Store, StoreError, SEARCH_LIMIT};

struct StoredReceipt {
    id: i64,
    title: String,
    image: Vec<u8>,
    created_at: DateTime<Utc>,
    user_id: i64,
}

#[derive(Default)]
struct UserTable {
    next_id: i64,
    rows: Vec<User>,
}

#[derive(Default)]
struct ReceiptTable {
    next_id: i64,
    rows: HashMap<i64, StoredReceipt>,
}

/// In-memory store for development and tests
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<UserTable>,
    receipts: Mutex<ReceiptTable>,
    likes: Mutex<HashSet<(i64, i64)>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn meta_of(receipt: &StoredReceipt) -> ReceiptMeta {
        ReceiptMeta {
            id: receipt.id,
            title: receipt.title.clone(),
            created_at: receipt.created_at,
            user_id: receipt.user_id,
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        let mut table = self.users.lock().unwrap();

        // Uniqueness check and insert happen under one lock, mirroring the
        // unique index in the SQL schema.
        if table.rows.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername);
        }

        table.next_id += 1;
        let user = User {
            id: table.next_id,
            username: username.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        table.rows.push(user.clone());
        Ok(user)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let table = self.users.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let table = self.users.lock().unwrap();
        Ok(table.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let table = self.users.lock().unwrap();
        Ok(table.rows.clone())
    }

    async fn create_receipt(
        &self,
        user_id: i64,
        title: &str,
        image: Vec<u8>,
    ) -> Result<ReceiptMeta, StoreError> {
        let mut table = self.receipts.lock().unwrap();
        table.next_id += 1;
        let receipt = StoredReceipt {
            id: table.next_id,
            title: title.to_string(),
            image,
            created_at: Utc::now(),
            user_id,
        };
        let meta = Self::meta_of(&receipt);
        table.rows.insert(receipt.id, receipt);
        Ok(meta)
    }

    async fn receipt_meta(&self, id: i64) -> Result<Option<ReceiptMeta>, StoreError> {
        let table = self.receipts.lock().unwrap();
        Ok(table.rows.get(&id).map(Self::meta_of))
    }

    async fn receipt_image(&self, id: i64) -> Result<Option<Vec<u8>>, StoreError> {
        let table = self.receipts.lock().unwrap();
        Ok(table.rows.get(&id).map(|r| r.image.clone()))
    }

    async fn receipt_details(&self, id: i64) -> Result<Option<ReceiptDetails>, StoreError> {
        // Copy the receipt fields out before consulting the other tables, so
        // this method holds one guard at a time.
        let Some(receipt) = self.receipts.lock().unwrap().rows.get(&id).map(|r| {
            (Self::meta_of(r), r.user_id)
        }) else {
            return Ok(None);
        };
        let (meta, owner_id) = receipt;

        let username = self
            .users
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|u| u.id == owner_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();

        let likes_count = self
            .likes
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, rid)| *rid == id)
            .count() as i64;

        Ok(Some(ReceiptDetails {
            id: meta.id,
            title: meta.title,
            created_at: meta.created_at,
            user_id: meta.user_id,
            username,
            likes_count,
        }))
    }

    async fn delete_receipt(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self.receipts.lock().unwrap().rows.remove(&id).is_some();
        if removed {
            // Cascade, as the SQL schema does.
            self.likes.lock().unwrap().retain(|(_, rid)| *rid != id);
        }
        Ok(removed)
    }

    async fn toggle_like(&self, user_id: i64, receipt_id: i64) -> Result<bool, StoreError> {
        // Referential check, standing in for the foreign key.
        if !self.receipts.lock().unwrap().rows.contains_key(&receipt_id) {
            return Err(StoreError::ReceiptMissing);
        }

        // Step 1: delete-if-present.
        {
            let mut likes = self.likes.lock().unwrap();
            if likes.remove(&(user_id, receipt_id)) {
                return Ok(false);
            }
        }

        // Step 2: insert-if-absent. If a concurrent toggle for the same pair
        // got here first, the set already contains the row and the end state
        // is "liked" either way - a duplicate can never exist.
        {
            let mut likes = self.likes.lock().unwrap();
            likes.insert((user_id, receipt_id));
            Ok(true)
        }
    }

    async fn search_receipts(
        &self,
        query: &str,
        viewer: Option<i64>,
    ) -> Result<Vec<ReceiptSummary>, StoreError> {
        let needle = query.to_lowercase();

        let users = self.users.lock().unwrap();
        let receipts = self.receipts.lock().unwrap();
        let likes = self.likes.lock().unwrap();

        let mut rows: Vec<ReceiptSummary> = receipts
            .rows
            .values()
            .filter_map(|receipt| {
                let owner = users.rows.iter().find(|u| u.id == receipt.user_id)?;
                let matches = receipt.title.to_lowercase().contains(&needle)
                    || owner.name.to_lowercase().contains(&needle);
                if !matches {
                    return None;
                }
                Some(ReceiptSummary {
                    id: receipt.id,
                    title: receipt.title.clone(),
                    created_at: receipt.created_at,
                    user_id: receipt.user_id,
                    username: owner.username.clone(),
                    likes_count: likes.iter().filter(|(_, rid)| *rid == receipt.id).count()
                        as i64,
                    liked_by_viewer: viewer
                        .map(|uid| likes.contains(&(uid, receipt.id)))
                        .unwrap_or(false),
                })
            })
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(SEARCH_LIMIT as usize);
        Ok(rows)
    }
}
