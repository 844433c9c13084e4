use crate::core::errors::{BilledError, RemoteError};
use crate::core::models::{BillDraft, RawBill, ReceiptUpload, UploadedReceipt};
use crate::infrastructure::store::RemoteStore;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

#[derive(Default)]
struct ScriptedFailures {
    list: Option<RemoteError>,
    create: Option<RemoteError>,
    update: Option<RemoteError>,
}

#[derive(Default)]
struct CallCounters {
    list: AtomicUsize,
    create: AtomicUsize,
    update: AtomicUsize,
}

/// Process-local stand-in for the bills API. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    bills: Arc<RwLock<Vec<RawBill>>>,
    failures: Arc<Mutex<ScriptedFailures>>,
    calls: Arc<CallCounters>,
    owner: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<RawBill>) -> Self {
        InMemoryStore {
            bills: Arc::new(RwLock::new(bills)),
            ..Self::default()
        }
    }

    /// Loads a JSON array of bills.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, BilledError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BilledError::InternalServerError(format!("Failed to read {}: {}", path.display(), e)))?;
        let bills: Vec<RawBill> = serde_json::from_str(&content)
            .map_err(|e| BilledError::InternalServerError(format!("Invalid seed file {}: {}", path.display(), e)))?;
        Ok(Self::with_bills(bills))
    }

    /// A view of the same records that only lists bills owned by `email`,
    /// as the real API does for employees.
    pub fn scoped_to(&self, email: &str) -> Self {
        InMemoryStore {
            owner: Some(email.to_string()),
            ..self.clone()
        }
    }

    pub async fn fail_next_list(&self, error: RemoteError) {
        self.failures.lock().await.list = Some(error);
    }

    pub async fn fail_next_create(&self, error: RemoteError) {
        self.failures.lock().await.create = Some(error);
    }

    pub async fn fail_next_update(&self, error: RemoteError) {
        self.failures.lock().await.update = Some(error);
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<RawBill> {
        self.bills.read().await.clone()
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn list_bills(&self) -> Result<Vec<RawBill>, RemoteError> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.lock().await.list.take() {
            return Err(error);
        }
        let bills = self.bills.read().await;
        Ok(bills
            .iter()
            .filter(|b| match &self.owner {
                Some(owner) => b.email.as_deref() == Some(owner.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn create_receipt(&self, upload: ReceiptUpload) -> Result<UploadedReceipt, RemoteError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.lock().await.create.take() {
            return Err(error);
        }
        let key = Uuid::new_v4().to_string();
        let file_url = format!("memory://receipts/{}/{}", key, upload.file_name);
        self.bills.write().await.push(RawBill {
            id: key.clone(),
            email: Some(upload.email),
            file_url: Some(file_url.clone()),
            file_name: Some(upload.file_name),
            ..RawBill::default()
        });
        Ok(UploadedReceipt { key, file_url })
    }

    async fn update_bill(&self, selector: &str, draft: BillDraft) -> Result<RawBill, RemoteError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.failures.lock().await.update.take() {
            return Err(error);
        }
        let mut bills = self.bills.write().await;
        let slot = bills
            .iter_mut()
            .find(|b| b.id == selector)
            .ok_or_else(|| RemoteError::from_status(404))?;
        *slot = draft.into_raw(selector);
        Ok(slot.clone())
    }
}
