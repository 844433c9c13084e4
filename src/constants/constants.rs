// Activity journal actions
pub const BILLS_LISTED: &str = "BILLS_LISTED";
pub const BILLS_LIST_FAILED: &str = "BILLS_LIST_FAILED";
pub const MALFORMED_BILL: &str = "MALFORMED_BILL";
pub const RECEIPT_REJECTED: &str = "RECEIPT_REJECTED";
pub const RECEIPT_UPLOADED: &str = "RECEIPT_UPLOADED";
pub const RECEIPT_UPLOAD_FAILED: &str = "RECEIPT_UPLOAD_FAILED";
pub const BILL_SUBMITTED: &str = "BILL_SUBMITTED";
pub const BILL_SUBMIT_FAILED: &str = "BILL_SUBMIT_FAILED";

/// Receipt formats the receipt viewer can render.
pub const ALLOWED_RECEIPT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
pub const ALLOWED_RECEIPT_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// Used when the form leaves the VAT percentage empty.
pub const DEFAULT_VAT_PCT: f64 = 20.0;

pub const NO_RECEIPT_MESSAGE: &str = "Aucun justificatif joint";
