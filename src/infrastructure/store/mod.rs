use crate::core::errors::RemoteError;
use crate::core::models::{BillDraft, RawBill, ReceiptUpload, UploadedReceipt};
use async_trait::async_trait;

pub mod http;
pub mod in_memory;

/// The `bills` resource of the remote persistence API.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_bills(&self) -> Result<Vec<RawBill>, RemoteError>;
    /// Uploads a receipt and creates the partial record that will hold it.
    async fn create_receipt(&self, upload: ReceiptUpload) -> Result<UploadedReceipt, RemoteError>;
    /// Writes the full bill into the record created by `create_receipt`.
    async fn update_bill(&self, selector: &str, draft: BillDraft) -> Result<RawBill, RemoteError>;
}
