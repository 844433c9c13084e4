use crate::constants::constants::{BILLS_LISTED, BILLS_LIST_FAILED, MALFORMED_BILL, NO_RECEIPT_MESSAGE};
use crate::core::errors::BilledError;
use crate::core::format::parse_date;
use crate::core::models::{Bill, BillsPageView, DisplayBill, RawBill, ReceiptIcon, ReceiptPreview, SessionUser};
use crate::core::navigation::{Navigator, PageGuard, Route};
use crate::core::session::SessionInfo;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::store::RemoteStore;
use chrono::NaiveDate;
use serde_json::json;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

/// Normalizes fetched records for the list screen.
///
/// Records are ordered most recent first. Records whose date does not parse
/// come after every dated record, in the order they were fetched. Malformed
/// records are kept with their raw date and status.
pub fn present_bills(raw: &[RawBill]) -> Vec<DisplayBill> {
    let mut rows: Vec<(Option<NaiveDate>, DisplayBill)> = raw
        .iter()
        .map(|record| {
            let sort_key = record.date.as_deref().and_then(|d| parse_date(d).ok());
            let display = match Bill::try_from(record) {
                Ok(bill) => DisplayBill::from_bill(&bill),
                Err(error) => DisplayBill::passthrough(record, &error),
            };
            (sort_key, display)
        })
        .collect();

    rows.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    rows.into_iter().map(|(_, display)| display).collect()
}

/// Controller of the "Mes notes de frais" screen.
pub struct BillListController<S: RemoteStore + ?Sized, L: LoggingService + ?Sized, N: Navigator + ?Sized> {
    store: Arc<S>,
    logging: Arc<L>,
    navigator: Arc<N>,
    user: SessionUser,
    page: PageGuard,
}

impl<S: RemoteStore + ?Sized, L: LoggingService + ?Sized, N: Navigator + ?Sized> BillListController<S, L, N> {
    pub fn new(
        store: Arc<S>,
        logging: Arc<L>,
        navigator: Arc<N>,
        session: &dyn SessionInfo,
    ) -> Result<Self, BilledError> {
        let user = session.current_user()?;
        Ok(BillListController {
            store,
            logging,
            navigator,
            user,
            page: PageGuard::new(),
        })
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn page(&self) -> &PageGuard {
        &self.page
    }

    pub async fn get_bills(&self) -> Result<Vec<DisplayBill>, BilledError> {
        let raw = match self.store.list_bills().await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(status = error.status, "Failed to fetch bills: {}", error.message);
                self.record(BILLS_LIST_FAILED, json!({ "status": error.status, "message": error.message }))
                    .await;
                return Err(error.into());
            }
        };
        if !self.page.is_active() {
            return Err(BilledError::ViewDetached);
        }

        let bills = present_bills(&raw);
        let anomalies = bills.iter().filter(|b| b.is_malformed()).map(|bill| {
            let anomaly = bill.anomaly.as_deref().unwrap_or_default();
            warn!(bill_id = %bill.id, "Keeping malformed bill unformatted: {}", anomaly);
            self.record(MALFORMED_BILL, json!({ "bill_id": bill.id, "anomaly": anomaly }))
        });
        futures::future::join_all(anomalies).await;
        info!(count = bills.len(), "Bills fetched for {}", self.user.email);
        self.record(BILLS_LISTED, json!({ "count": bills.len() })).await;
        Ok(bills)
    }

    /// Bills, or the error panel when the store rejected the request.
    pub async fn load_page(&self) -> BillsPageView {
        match self.get_bills().await {
            Ok(bills) => BillsPageView::Data(bills),
            Err(error) => BillsPageView::Error(error.to_string()),
        }
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// The receipt image is shown at half the modal width.
    pub fn handle_click_icon_eye(&self, icon: &ReceiptIcon, modal_width: u32) -> ReceiptPreview {
        // Older records were saved with the literal string "null".
        match icon.bill_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && url != "null" => ReceiptPreview::Image {
                url: url.to_string(),
                width: modal_width / 2,
            },
            _ => ReceiptPreview::Missing {
                message: NO_RECEIPT_MESSAGE.to_string(),
            },
        }
    }

    async fn record(&self, action: &str, details: serde_json::Value) {
        if let Err(e) = self.logging.log_action(action, details, Some(&self.user.email)).await {
            warn!("Activity journal unavailable: {}", e);
        }
    }
}
