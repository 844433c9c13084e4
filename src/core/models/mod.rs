pub mod audit;
pub mod bill;
pub mod display;
pub mod form;
pub mod user;

pub use audit::AppLog;
pub use bill::{Bill, BillDraft, BillStatus, Numeric, RawBill, Receipt, ReceiptUpload, UploadedReceipt};
pub use display::{BillsPageView, DisplayBill, ReceiptPreview};
pub use form::{FileSelection, FormSubmitEvent, NewBillForm, ReceiptIcon};
pub use user::{SessionUser, UserType};
