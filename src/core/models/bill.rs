use crate::core::errors::MalformedRecordError;
use crate::core::format::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle state of a bill. Only an administrator moves a bill out of
/// `Pending`; this crate never does.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = MalformedRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(MalformedRecordError::UnknownStatus(other.to_string())),
        }
    }
}

/// Numbers come back from the API either as JSON numbers or as numeric
/// strings (`"vat": "80"`).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) if n.is_finite() => Some(*n),
            Numeric::Number(_) => None,
            Numeric::Text(s) => s.trim().replace(',', ".").parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

/// A bill record exactly as the remote store returned it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    #[serde(default)]
    pub id: String,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub expense_type: Option<String>,
    pub name: Option<String>,
    pub amount: Option<Numeric>,
    pub date: Option<String>,
    pub vat: Option<Numeric>,
    pub pct: Option<Numeric>,
    pub commentary: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub status: Option<String>,
}

/// Receipt attached to a bill. Older records carry the URL without a name.
#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub file_url: String,
    pub file_name: Option<String>,
}

/// A bill whose date and status have been validated.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    pub id: String,
    pub email: String,
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub vat: Option<f64>,
    pub pct: Option<f64>,
    pub commentary: Option<String>,
    pub receipt: Option<Receipt>,
    pub status: BillStatus,
}

impl TryFrom<&RawBill> for Bill {
    type Error = MalformedRecordError;

    fn try_from(raw: &RawBill) -> Result<Self, Self::Error> {
        let date = parse_date(raw.date.as_deref().unwrap_or_default())?;
        let status = raw.status.as_deref().unwrap_or_default().parse::<BillStatus>()?;
        let receipt = raw
            .file_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| Receipt {
                file_url: url.to_string(),
                file_name: raw.file_name.clone(),
            });

        Ok(Bill {
            id: raw.id.clone(),
            email: raw.email.clone().unwrap_or_default(),
            expense_type: raw.expense_type.clone().unwrap_or_default(),
            name: raw.name.clone().unwrap_or_default(),
            amount: raw.amount.as_ref().and_then(Numeric::as_f64).unwrap_or_default(),
            date,
            vat: raw.vat.as_ref().and_then(Numeric::as_f64),
            pct: raw.pct.as_ref().and_then(Numeric::as_f64),
            commentary: raw.commentary.clone(),
            receipt,
            status,
        })
    }
}

/// Payload sent when an employee submits the new-bill form.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
    pub vat: Option<f64>,
    pub pct: f64,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

impl BillDraft {
    /// The record the store is expected to hold once the draft is applied
    /// under `key`.
    pub fn into_raw(self, key: &str) -> RawBill {
        RawBill {
            id: key.to_string(),
            email: Some(self.email),
            expense_type: Some(self.expense_type),
            name: Some(self.name),
            amount: Some(Numeric::Number(self.amount)),
            date: Some(self.date),
            vat: self.vat.map(Numeric::Number),
            pct: Some(Numeric::Number(self.pct)),
            commentary: Some(self.commentary),
            file_url: Some(self.file_url),
            file_name: Some(self.file_name),
            status: Some(self.status.to_string()),
        }
    }
}

/// Receipt file sent on the eager upload that precedes form submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedReceipt {
    pub key: String,
    pub file_url: String,
}
