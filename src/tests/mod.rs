mod bills_tests;
mod http_store_tests;

use crate::core::bills::BillListController;
use crate::core::models::{RawBill, SessionUser};
use crate::core::navigation::RouteRecorder;
use crate::core::new_bill::NewBillController;
use crate::core::session::StaticSession;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::store::in_memory::InMemoryStore;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

pub const EMPLOYEE_EMAIL: &str = "a@a";

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{}", addr)
}

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
    pub logging: Arc<InMemoryLogging>,
    pub navigator: Arc<RouteRecorder>,
    pub session: StaticSession,
}

impl TestContext {
    pub fn new(bills: Vec<RawBill>) -> Self {
        let _ = env_logger::try_init();
        TestContext {
            store: Arc::new(InMemoryStore::with_bills(bills)),
            logging: Arc::new(InMemoryLogging::new()),
            navigator: Arc::new(RouteRecorder::new()),
            session: StaticSession::new(SessionUser::employee(EMPLOYEE_EMAIL)),
        }
    }

    pub fn bill_list(&self) -> BillListController<InMemoryStore, InMemoryLogging, RouteRecorder> {
        BillListController::new(
            self.store.clone(),
            self.logging.clone(),
            self.navigator.clone(),
            &self.session,
        )
        .unwrap()
    }

    pub fn new_bill(&self) -> NewBillController<InMemoryStore, InMemoryLogging, RouteRecorder> {
        NewBillController::new(
            self.store.clone(),
            self.logging.clone(),
            self.navigator.clone(),
            &self.session,
        )
        .unwrap()
    }
}

/// The four bills of the employee `a@a`, in the order the API returns them.
pub fn fixture_bills() -> Vec<RawBill> {
    serde_json::from_value(json!([
        {
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg?alt=media",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        },
        {
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "vat": "",
            "amount": 100,
            "name": "test1",
            "fileName": "1592770761.jpeg",
            "commentary": "plop",
            "pct": 20,
            "type": "Transports",
            "email": "a@a",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2F1592770761.jpeg?alt=media",
            "date": "2001-01-01",
            "status": "refused",
            "commentAdmin": "en fait non"
        },
        {
            "id": "UIUZtnPQvnbFnB0ozvJh",
            "name": "test3",
            "email": "a@a",
            "type": "Services en ligne",
            "vat": "60",
            "pct": 20,
            "commentAdmin": "bon bah d'accord",
            "amount": 300,
            "status": "accepted",
            "date": "2003-03-03",
            "commentary": "",
            "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Ffacture-client.png?alt=media"
        },
        {
            "id": "qcCK3SzECmaZAGRrHjaC",
            "status": "refused",
            "pct": 20,
            "amount": 200,
            "email": "a@a",
            "name": "test2",
            "vat": "40",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2002-02-02",
            "commentAdmin": "pas la bonne facture",
            "commentary": "test2",
            "type": "Restaurants et bars",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.appspot.com/o/justificatifs%2Fpreview-facture-free-201801-pdf-1.jpg?alt=media"
        }
    ]))
    .unwrap()
}
