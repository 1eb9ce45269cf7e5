//! Receipts Module
//!
//! Receipt upload, image serving, public details, and owner-only deletion.
//!
//! # Module Structure
//!
//! ```text
//! receipts/
//! ├── mod.rs       - Module exports
//! ├── models.rs    - Storage-level receipt records
//! └── handlers.rs  - HTTP handlers
//! ```

/// Storage-level receipt records
pub mod models;

/// HTTP handlers
pub mod handlers;

pub use handlers::{delete_receipt, get_receipt_details, get_receipt_image, upload_receipt};
pub use models::{ReceiptDetails, ReceiptMeta, ReceiptSummary};
