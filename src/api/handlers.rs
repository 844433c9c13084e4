use crate::{
    api::{
        AppState,
        models::{ApiError, ErrorResponse, ReceiptPreviewRequest, RedirectResponse},
    },
    auth::jwt::ClaimsSession,
    core::{
        bills::BillListController,
        errors::{BilledError, ValidationError},
        models::{
            AppLog, BillsPageView, FileSelection, FormSubmitEvent, NewBillForm, ReceiptIcon, ReceiptPreview, UserType,
        },
        navigation::{Route, RouteRecorder},
        new_bill::{NewBillController, validate_form},
    },
    infrastructure::logging::LoggingService,
};
use axum::{
    Extension, Json, Router,
    extract::{Multipart, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use http::header;
use std::sync::Arc;
use tracing::warn;

// Middleware to validate JWT
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| BilledError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| BilledError::Unauthorized("Invalid Authorization header".to_string()))?
        .to_string();

    let claims = state.jwt.validate_token(&token)?;
    req.extensions_mut().insert(ClaimsSession { claims, token });
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/bills", axum::routing::get(get_bills).post(submit_new_bill))
        .route("/bills/new", axum::routing::get(open_new_bill))
        .route("/bills/receipt-preview", axum::routing::post(preview_receipt))
        .route("/logs", axum::routing::get(get_app_logs))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/bills",
    responses(
        (status = 200, description = "Bills of the current user, most recent first", body = BillsPageView),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Bills API answered 404", body = BillsPageView),
        (status = 500, description = "Bills API answered 500", body = BillsPageView)
    ),
    security(("Bearer" = []))
)]
pub async fn get_bills(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ClaimsSession>,
) -> Result<Response, ApiError> {
    let controller = BillListController::new(
        state.backend.store_for(&session),
        state.logging.clone(),
        Arc::new(RouteRecorder::new()),
        &session,
    )?;
    match controller.get_bills().await {
        Ok(bills) => Ok(Json(BillsPageView::Data(bills)).into_response()),
        Err(error) => {
            let status = ApiError(error.clone()).status();
            Ok((status, Json(BillsPageView::Error(error.to_string()))).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/bills/new",
    responses(
        (status = 200, description = "Route of the new-bill form", body = RedirectResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn open_new_bill(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ClaimsSession>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let navigator = Arc::new(RouteRecorder::new());
    let controller = BillListController::new(
        state.backend.store_for(&session),
        state.logging.clone(),
        navigator.clone(),
        &session,
    )?;
    controller.handle_click_new_bill();
    Ok(Json(redirect_to(&navigator, Route::NewBill)))
}

#[utoipa::path(
    post,
    path = "/api/bills/receipt-preview",
    request_body = ReceiptPreviewRequest,
    responses(
        (status = 200, description = "Receipt modal content", body = ReceiptPreview),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn preview_receipt(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ClaimsSession>,
    Json(req): Json<ReceiptPreviewRequest>,
) -> Result<Json<ReceiptPreview>, ApiError> {
    let controller = BillListController::new(
        state.backend.store_for(&session),
        state.logging.clone(),
        Arc::new(RouteRecorder::new()),
        &session,
    )?;
    let icon = ReceiptIcon { bill_url: req.bill_url };
    Ok(Json(controller.handle_click_icon_eye(&icon, req.modal_width)))
}

#[utoipa::path(
    post,
    path = "/api/bills",
    request_body(content = NewBillForm, content_type = "multipart/form-data", description = "Form fields plus the receipt `file` part"),
    responses(
        (status = 200, description = "Bill submitted, redirect to the bill list", body = RedirectResponse),
        (status = 400, description = "Invalid receipt or form values", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Bills API failure", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn submit_new_bill(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ClaimsSession>,
    mut multipart: Multipart,
) -> Result<Json<RedirectResponse>, ApiError> {
    let mut form = NewBillForm::default();
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| BilledError::InvalidRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let path = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(String::from);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| BilledError::InvalidRequest(e.to_string()))?;
            file = Some(FileSelection::new(path, content_type.as_deref(), bytes.to_vec()));
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| BilledError::InvalidRequest(e.to_string()))?;
        match name.as_str() {
            "type" => form.expense_type = value,
            "name" => form.name = value,
            "amount" => form.amount = value,
            "date" => form.date = value,
            "vat" => form.vat = value,
            "pct" => form.pct = value,
            "commentary" => form.commentary = value,
            _ => {}
        }
    }
    let file = file.ok_or(BilledError::Validation(ValidationError::ReceiptMissing))?;
    // The whole form is known up front: reject it before the receipt is uploaded.
    if let Err(error) = validate_form(&form) {
        warn!("Rejected new bill from {}: {}", session.claims.sub, error);
        return Err(BilledError::from(error).into());
    }

    let navigator = Arc::new(RouteRecorder::new());
    let mut controller = NewBillController::new(
        state.backend.store_for(&session),
        state.logging.clone(),
        navigator.clone(),
        &session,
    )?;
    controller.handle_change_file(file).await?;
    let mut event = FormSubmitEvent::new(form);
    controller.handle_submit(&mut event).await?;
    Ok(Json(redirect_to(&navigator, Route::Bills)))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Activity journal; employees only see their own entries", body = [AppLog]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
pub async fn get_app_logs(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ClaimsSession>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = match session.claims.user_type {
        UserType::Admin => state.logging.get_logs().await?,
        UserType::Employee => state.logging.get_user_logs(&session.claims.sub).await?,
    };
    Ok(Json(logs))
}

fn redirect_to(navigator: &RouteRecorder, fallback: Route) -> RedirectResponse {
    RedirectResponse {
        redirect: navigator.last().unwrap_or(fallback).path().to_string(),
    }
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
