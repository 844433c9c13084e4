use super::bill::{Bill, RawBill};
use crate::core::errors::MalformedRecordError;
use crate::core::format::{format_date, format_status};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A bill shaped for the list screen. `date` and `status` are display labels
/// for well-formed records and the raw values otherwise.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBill {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: Option<f64>,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: Option<f64>,
    pub commentary: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: String,
    /// Set when the record could not be normalized.
    pub anomaly: Option<String>,
}

impl DisplayBill {
    pub fn from_bill(bill: &Bill) -> Self {
        DisplayBill {
            id: bill.id.clone(),
            email: bill.email.clone(),
            expense_type: bill.expense_type.clone(),
            name: bill.name.clone(),
            amount: Some(bill.amount),
            date: format_date(bill.date),
            vat: bill.vat,
            pct: bill.pct,
            commentary: bill.commentary.clone(),
            file_url: bill.receipt.as_ref().map(|r| r.file_url.clone()),
            file_name: bill.receipt.as_ref().and_then(|r| r.file_name.clone()),
            status: format_status(bill.status).to_string(),
            anomaly: None,
        }
    }

    pub fn passthrough(raw: &RawBill, error: &MalformedRecordError) -> Self {
        DisplayBill {
            id: raw.id.clone(),
            email: raw.email.clone().unwrap_or_default(),
            expense_type: raw.expense_type.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            amount: raw.amount.as_ref().and_then(|n| n.as_f64()),
            date: raw.date.clone().unwrap_or_default(),
            vat: raw.vat.as_ref().and_then(|n| n.as_f64()),
            pct: raw.pct.as_ref().and_then(|n| n.as_f64()),
            commentary: raw.commentary.clone(),
            file_url: raw.file_url.clone(),
            file_name: raw.file_name.clone(),
            status: raw.status.clone().unwrap_or_default(),
            anomaly: Some(error.to_string()),
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.anomaly.is_some()
    }
}

/// What the list screen renders: either the bills or an error panel.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BillsPageView {
    Data(Vec<DisplayBill>),
    Error(String),
}

impl BillsPageView {
    /// Text shown to the user, used by adapters that render plain text.
    pub fn render_text(&self) -> String {
        match self {
            BillsPageView::Data(bills) => bills
                .iter()
                .map(|b| format!("{} | {} | {} | {}", b.expense_type, b.name, b.date, b.status))
                .collect::<Vec<_>>()
                .join("\n"),
            BillsPageView::Error(message) => format!("Erreur\n{}", message),
        }
    }
}

/// Content of the receipt modal opened from the eye icon.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReceiptPreview {
    Image { url: String, width: u32 },
    Missing { message: String },
}
