use crate::constants::constants::{
    ALLOWED_RECEIPT_CONTENT_TYPES, ALLOWED_RECEIPT_EXTENSIONS, BILL_SUBMITTED, BILL_SUBMIT_FAILED, DEFAULT_VAT_PCT,
    RECEIPT_REJECTED, RECEIPT_UPLOADED, RECEIPT_UPLOAD_FAILED,
};
use crate::core::errors::{BilledError, ValidationError};
use crate::core::format::{DATE_FORMAT, parse_date};
use crate::core::models::{
    BillDraft, BillStatus, FileSelection, FormSubmitEvent, NewBillForm, ReceiptUpload, SessionUser,
};
use crate::core::navigation::{Navigator, PageGuard, Route};
use crate::core::session::SessionInfo;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::store::RemoteStore;
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Receipt already uploaded and waiting for the form to be submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StagedReceipt {
    pub key: String,
    pub file_url: String,
    pub file_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NewBillState {
    Empty,
    FileStaged(StagedReceipt),
    Submitted,
    Exited,
}

/// Checks the extension and, when the browser declared one, the content type.
pub fn validate_receipt(selection: &FileSelection) -> Result<(), ValidationError> {
    let rejected = || ValidationError::UnsupportedFileType(selection.file_name().to_string());

    let extension = selection.extension().ok_or_else(rejected)?;
    if !ALLOWED_RECEIPT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(rejected());
    }
    if let Some(content_type) = &selection.content_type {
        let content_type = content_type.trim().to_ascii_lowercase();
        if !content_type.is_empty() && !ALLOWED_RECEIPT_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(rejected());
        }
    }
    Ok(())
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    Ok(value)
}

struct FormValues<'a> {
    expense_type: &'a str,
    date: NaiveDate,
    amount: f64,
    vat: Option<f64>,
    pct: f64,
}

fn parse_form(form: &NewBillForm) -> Result<FormValues<'_>, ValidationError> {
    let expense_type = required("type", &form.expense_type)?;

    let date = required("date", &form.date)?;
    let date = parse_date(date).map_err(|_| ValidationError::InvalidDate(date.to_string()))?;

    let amount = required("amount", &form.amount)?;
    let amount = parse_number(amount)
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| ValidationError::InvalidAmount(amount.to_string()))?;

    let vat = match form.vat.trim() {
        "" => None,
        vat => Some(
            parse_number(vat)
                .filter(|n| *n >= 0.0)
                .ok_or_else(|| ValidationError::InvalidAmount(format!("vat {}", vat)))?,
        ),
    };

    let pct = match parse_number(&form.pct) {
        Some(pct) if pct < 0.0 => return Err(ValidationError::InvalidAmount(format!("pct {}", pct))),
        Some(pct) => pct,
        None => DEFAULT_VAT_PCT,
    };

    Ok(FormValues {
        expense_type,
        date,
        amount,
        vat,
        pct,
    })
}

/// Checks the typed values alone, before any receipt is uploaded.
pub fn validate_form(form: &NewBillForm) -> Result<(), ValidationError> {
    parse_form(form).map(|_| ())
}

/// Turns the typed form values and the staged receipt into a pending bill.
pub fn build_draft(
    form: &NewBillForm,
    receipt: &StagedReceipt,
    email: &str,
) -> Result<BillDraft, ValidationError> {
    let values = parse_form(form)?;

    Ok(BillDraft {
        email: email.to_string(),
        expense_type: values.expense_type.to_string(),
        name: form.name.trim().to_string(),
        amount: values.amount,
        date: values.date.format(DATE_FORMAT).to_string(),
        vat: values.vat,
        pct: values.pct,
        commentary: form.commentary.trim().to_string(),
        file_url: receipt.file_url.clone(),
        file_name: receipt.file_name.clone(),
        status: BillStatus::Pending,
    })
}

/// Controller of the "Envoyer une note de frais" screen.
///
/// The receipt is uploaded as soon as it is selected; submission then writes
/// the form values into the record created by that upload.
pub struct NewBillController<S: RemoteStore + ?Sized, L: LoggingService + ?Sized, N: Navigator + ?Sized> {
    store: Arc<S>,
    logging: Arc<L>,
    navigator: Arc<N>,
    user: SessionUser,
    page: PageGuard,
    state: NewBillState,
    file_input: Option<FileSelection>,
    error: Option<String>,
    last_form: Option<NewBillForm>,
}

impl<S: RemoteStore + ?Sized, L: LoggingService + ?Sized, N: Navigator + ?Sized> NewBillController<S, L, N> {
    pub fn new(
        store: Arc<S>,
        logging: Arc<L>,
        navigator: Arc<N>,
        session: &dyn SessionInfo,
    ) -> Result<Self, BilledError> {
        let user = session.current_user()?;
        Ok(NewBillController {
            store,
            logging,
            navigator,
            user,
            page: PageGuard::new(),
            state: NewBillState::Empty,
            file_input: None,
            error: None,
            last_form: None,
        })
    }

    pub fn state(&self) -> &NewBillState {
        &self.state
    }

    pub fn page(&self) -> &PageGuard {
        &self.page
    }

    /// Message for the form's error slot.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Name of the file currently held by the receipt input.
    pub fn selected_file_name(&self) -> Option<&str> {
        self.file_input.as_ref().map(|f| f.file_name())
    }

    /// Values of the last submission attempt, kept so a failed submit loses nothing.
    pub fn last_form(&self) -> Option<&NewBillForm> {
        self.last_form.as_ref()
    }

    pub fn staged_receipt(&self) -> Option<&StagedReceipt> {
        match &self.state {
            NewBillState::FileStaged(receipt) => Some(receipt),
            _ => None,
        }
    }

    pub async fn handle_change_file(&mut self, selection: FileSelection) -> Result<StagedReceipt, BilledError> {
        self.ensure_editable()?;
        self.error = None;
        self.state = NewBillState::Empty;

        if let Err(error) = validate_receipt(&selection) {
            warn!("Rejected receipt {}: {}", selection.file_name(), error);
            self.file_input = None;
            self.error = Some(error.to_string());
            self.record(RECEIPT_REJECTED, json!({ "file_name": selection.file_name() }))
                .await;
            return Err(error.into());
        }

        let file_name = selection.file_name().to_string();
        let upload = ReceiptUpload {
            file_name: file_name.clone(),
            content_type: selection.content_type.clone(),
            bytes: selection.bytes.clone(),
            email: self.user.email.clone(),
        };
        self.file_input = Some(selection);

        let result = self.store.create_receipt(upload).await;
        if !self.page.is_active() {
            return Err(BilledError::ViewDetached);
        }
        match result {
            Ok(uploaded) => {
                let staged = StagedReceipt {
                    key: uploaded.key,
                    file_url: uploaded.file_url,
                    file_name,
                };
                info!(key = %staged.key, "Receipt {} uploaded", staged.file_name);
                self.record(RECEIPT_UPLOADED, json!({ "key": staged.key, "file_name": staged.file_name }))
                    .await;
                self.state = NewBillState::FileStaged(staged.clone());
                Ok(staged)
            }
            Err(error) => {
                warn!(status = error.status, "Receipt upload failed: {}", error.message);
                self.error = Some(error.to_string());
                self.record(
                    RECEIPT_UPLOAD_FAILED,
                    json!({ "file_name": file_name, "status": error.status }),
                )
                .await;
                Err(error.into())
            }
        }
    }

    pub async fn handle_submit(&mut self, event: &mut FormSubmitEvent) -> Result<(), BilledError> {
        event.prevent_default();
        self.ensure_editable()?;
        self.last_form = Some(event.form.clone());

        let receipt = match self.staged_receipt().cloned() {
            Some(receipt) => receipt,
            None => return Err(self.reject(ValidationError::ReceiptMissing)),
        };
        let draft = match build_draft(&event.form, &receipt, &self.user.email) {
            Ok(draft) => draft,
            Err(error) => return Err(self.reject(error)),
        };
        self.error = None;

        let result = self.store.update_bill(&receipt.key, draft).await;
        if !self.page.is_active() {
            return Err(BilledError::ViewDetached);
        }
        match result {
            Ok(saved) => {
                self.state = NewBillState::Submitted;
                info!(key = %receipt.key, "Bill submitted by {}", self.user.email);
                self.record(BILL_SUBMITTED, json!({ "key": saved.id })).await;
                self.navigator.navigate(Route::Bills);
                self.state = NewBillState::Exited;
                Ok(())
            }
            Err(error) => {
                warn!(status = error.status, "Bill submission failed: {}", error.message);
                self.error = Some(error.to_string());
                self.record(BILL_SUBMIT_FAILED, json!({ "key": receipt.key, "status": error.status }))
                    .await;
                Err(error.into())
            }
        }
    }

    fn ensure_editable(&self) -> Result<(), BilledError> {
        match self.state {
            NewBillState::Submitted | NewBillState::Exited => Err(ValidationError::AlreadySubmitted.into()),
            _ => Ok(()),
        }
    }

    fn reject(&mut self, error: ValidationError) -> BilledError {
        self.error = Some(error.to_string());
        error.into()
    }

    async fn record(&self, action: &str, details: serde_json::Value) {
        if let Err(e) = self.logging.log_action(action, details, Some(&self.user.email)).await {
            warn!("Activity journal unavailable: {}", e);
        }
    }
}
