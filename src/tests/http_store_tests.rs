use crate::core::bills::BillListController;
use crate::core::models::{BillDraft, BillStatus, RawBill, ReceiptUpload};
use crate::core::navigation::RouteRecorder;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::store::RemoteStore;
use crate::infrastructure::store::http::HttpRemoteStore;
use crate::tests::{EMPLOYEE_EMAIL, TestContext, fixture_bills, serve};
use axum::{
    Json, Router,
    extract::{Multipart, Path},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, patch},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

const TOKEN: &str = "token-a";

async fn list_bills(headers: HeaderMap) -> Result<Json<Vec<RawBill>>, (StatusCode, Json<Value>)> {
    let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if auth != Some("Bearer token-a") {
        return Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "jwt malformed" }))));
    }
    Ok(Json(fixture_bills()))
}

async fn create_bill(mut multipart: Multipart) -> Json<Value> {
    let mut file_name = String::new();
    let mut email = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            file_name = field.file_name().unwrap_or_default().to_string();
        } else if name == "email" {
            email = field.text().await.unwrap();
        }
    }
    Json(json!({
        "key": "1234",
        "fileUrl": format!("https://localhost:3456/images/{}?owner={}", file_name, email)
    }))
}

async fn update_bill(Path(key): Path<String>, Json(draft): Json<BillDraft>) -> Json<RawBill> {
    Json(draft.into_raw(&key))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn garbled() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>maintenance</html>")
}

fn bills_api() -> Router {
    Router::new()
        .route("/bills", get(list_bills).post(create_bill))
        .route("/bills/{key}", patch(update_bill))
}

fn client(base_url: &str) -> HttpRemoteStore {
    HttpRemoteStore::new(base_url, Duration::from_secs(5)).unwrap()
}

fn draft() -> BillDraft {
    BillDraft {
        email: EMPLOYEE_EMAIL.to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: "encore".to_string(),
        amount: 400.0,
        date: "2004-04-04".to_string(),
        vat: Some(80.0),
        pct: 20.0,
        commentary: "séminaire billed".to_string(),
        file_url: "https://localhost:3456/images/test.jpg".to_string(),
        file_name: "test.jpg".to_string(),
        status: BillStatus::Pending,
    }
}

#[tokio::test]
async fn test_list_sends_bearer_token() {
    let base = serve(bills_api()).await;
    let store = client(&base).with_token(TOKEN);

    let bills = store.list_bills().await.unwrap();

    assert_eq!(bills.len(), 4);
}

#[tokio::test]
async fn test_error_message_comes_from_response_body() {
    let base = serve(bills_api()).await;

    let error = client(&base).list_bills().await.unwrap_err();

    assert_eq!(error.status, 401);
    assert_eq!(error.message, "jwt malformed");
}

#[tokio::test]
async fn test_error_without_body_message_uses_status() {
    let base = serve(Router::new().route("/bills", get(broken))).await;

    let error = client(&base).with_token(TOKEN).list_bills().await.unwrap_err();

    assert_eq!(error.status, 500);
    assert_eq!(error.message, "Erreur 500");
}

#[tokio::test]
async fn test_unreadable_success_body_is_a_bad_gateway() {
    let base = serve(Router::new().route("/bills", get(garbled))).await;

    let error = client(&base).with_token(TOKEN).list_bills().await.unwrap_err();

    assert_eq!(error.status, 502);
    assert!(error.message.starts_with("Invalid response body"));
}

#[tokio::test]
async fn test_unreachable_api_is_a_remote_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let error = client(&format!("http://{}", addr)).list_bills().await.unwrap_err();

    assert_eq!(error.status, 503);
}

#[tokio::test]
async fn test_receipt_upload_is_multipart_with_email() {
    let base = serve(bills_api()).await;
    let upload = ReceiptUpload {
        file_name: "image.png".to_string(),
        content_type: Some("image/png".to_string()),
        bytes: b"image".to_vec(),
        email: EMPLOYEE_EMAIL.to_string(),
    };

    let uploaded = client(&base).with_token(TOKEN).create_receipt(upload).await.unwrap();

    assert_eq!(uploaded.key, "1234");
    assert_eq!(uploaded.file_url, "https://localhost:3456/images/image.png?owner=a@a");
}

#[tokio::test]
async fn test_update_patches_selected_bill() {
    let base = serve(bills_api()).await;

    let saved = client(&base).with_token(TOKEN).update_bill("1234", draft()).await.unwrap();

    assert_eq!(saved.id, "1234");
    assert_eq!(saved.status.as_deref(), Some("pending"));
    assert_eq!(saved.file_name.as_deref(), Some("test.jpg"));
}

#[tokio::test]
async fn test_bill_list_controller_over_http() {
    let base = serve(bills_api()).await;
    let ctx = TestContext::new(Vec::new());
    let store: Arc<dyn RemoteStore> = Arc::new(client(&base).with_token(TOKEN));
    let controller = BillListController::new(
        store,
        Arc::new(InMemoryLogging::new()),
        Arc::new(RouteRecorder::new()),
        &ctx.session,
    )
    .unwrap();

    let bills = controller.get_bills().await.unwrap();

    assert_eq!(bills.len(), 4);
    assert_eq!(bills[0].date, "4 Avr. 04");
}
