//! Remote storage client for bills
//!
//! Controllers only see the [`BillStore`] trait. [`ApiStore`] talks to the
//! bills API over HTTP, [`MemoryStore`] keeps everything in process.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Bill, BillDraft, ReceiptFile, UploadedReceipt};

pub mod api;
pub mod memory;

pub use api::ApiStore;
pub use memory::MemoryStore;

/// Bills endpoint of the storage client
#[async_trait]
pub trait BillStore: Send + Sync {
    /// All bills visible to the current user.
    /// Fails with [`crate::BilledError::FetchFailed`] carrying the upstream message.
    async fn list(&self) -> Result<Vec<Bill>>;

    /// Upload a receipt for `email`, reserving a record key.
    /// Fails with [`crate::BilledError::CreateFailed`].
    async fn upload(&self, receipt: &ReceiptFile, email: &str) -> Result<UploadedReceipt>;

    /// Create the bill record, completing the one reserved by `draft.key` when set.
    /// Fails with [`crate::BilledError::CreateFailed`].
    async fn create(&self, draft: &BillDraft) -> Result<Bill>;
}
