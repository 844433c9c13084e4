use utoipa::OpenApi;

use crate::{
    api::models::{ErrorResponse, ReceiptPreviewRequest, RedirectResponse},
    core::models::{AppLog, BillsPageView, DisplayBill, NewBillForm, ReceiptPreview},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::get_bills,
        super::handlers::open_new_bill,
        super::handlers::preview_receipt,
        super::handlers::submit_new_bill,
        super::handlers::get_app_logs
    ),
    components(schemas(
        BillsPageView,
        DisplayBill,
        NewBillForm,
        ReceiptPreview,
        ReceiptPreviewRequest,
        RedirectResponse,
        ErrorResponse,
        AppLog
    )),
    info(
        title = "Billed API",
        description = "Employee expense reports: bill list and new-bill submission",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
