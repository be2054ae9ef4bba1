//! In-process bill store, seeded from fixtures for demos and tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::BillStore;
use crate::errors::{BilledError, Result};
use crate::fixtures;
use crate::models::{Bill, BillDraft, ReceiptFile, UploadedReceipt};

#[derive(Debug, Default)]
pub struct MemoryStore {
    bills: Mutex<Vec<Bill>>,
    created: Mutex<Vec<BillDraft>>,
    list_failure: Mutex<Option<String>>,
    create_failure: Mutex<Option<String>>,
    list_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the four sample bills
    pub fn with_fixtures() -> Self {
        Self::with_bills(fixtures::bills())
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
            ..Self::default()
        }
    }

    /// Make the next `list` call fail with `message`
    pub fn fail_next_list(&self, message: &str) {
        *lock(&self.list_failure) = Some(message.to_string());
    }

    /// Make the next `upload` or `create` call fail with `message`
    pub fn fail_next_create(&self, message: &str) {
        *lock(&self.create_failure) = Some(message.to_string());
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Drafts received by `create`, in call order
    pub fn created(&self) -> Vec<BillDraft> {
        lock(&self.created).clone()
    }

    pub fn bills(&self) -> Vec<Bill> {
        lock(&self.bills).clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl BillStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Bill>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = lock(&self.list_failure).take() {
            return Err(BilledError::FetchFailed(message));
        }
        Ok(lock(&self.bills).clone())
    }

    async fn upload(&self, receipt: &ReceiptFile, email: &str) -> Result<UploadedReceipt> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = lock(&self.create_failure).take() {
            return Err(BilledError::CreateFailed(message));
        }

        let key = Uuid::new_v4().to_string();
        debug!("Stored receipt {} ({} bytes) for {}", receipt.file_name(), receipt.bytes.len(), email);
        Ok(UploadedReceipt {
            file_url: format!("memory://receipts/{}/{}", key, receipt.file_name()),
            key,
        })
    }

    async fn create(&self, draft: &BillDraft) -> Result<Bill> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = lock(&self.create_failure).take() {
            return Err(BilledError::CreateFailed(message));
        }

        let bill = Bill {
            id: draft
                .key
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            email: draft.email.clone(),
            bill_type: draft.bill_type.clone(),
            name: draft.name.clone(),
            amount: draft.amount,
            date: draft.date.clone(),
            vat: draft.vat,
            pct: Some(draft.pct),
            commentary: draft.commentary.clone(),
            file_url: Some(draft.file_url.clone()),
            file_name: Some(draft.file_name.clone()),
            status: draft.status.clone(),
            comment_admin: None,
        };

        lock(&self.created).push(draft.clone());
        lock(&self.bills).push(bill.clone());
        Ok(bill)
    }
}
