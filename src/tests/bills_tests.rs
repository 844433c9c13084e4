use crate::constants::constants::{BILLS_LIST_FAILED, MALFORMED_BILL, NO_RECEIPT_MESSAGE};
use crate::core::bills::BillListController;
use crate::core::errors::{BilledError, RemoteError};
use crate::core::models::{BillsPageView, RawBill, ReceiptIcon, ReceiptPreview};
use crate::core::navigation::Route;
use crate::core::session::StaticSession;
use crate::infrastructure::logging::LoggingService;
use crate::tests::{EMPLOYEE_EMAIL, TestContext, fixture_bills};

#[tokio::test]
async fn test_get_bills_returns_every_fetched_bill() {
    let ctx = TestContext::new(fixture_bills());
    let controller = ctx.bill_list();

    let bills = controller.get_bills().await.unwrap();

    assert_eq!(bills.len(), 4);
    assert_eq!(ctx.store.list_calls(), 1);
    assert!(bills.iter().all(|b| b.email == EMPLOYEE_EMAIL));
}

#[tokio::test]
async fn test_get_bills_orders_most_recent_first() {
    let ctx = TestContext::new(fixture_bills());

    let bills = ctx.bill_list().get_bills().await.unwrap();

    let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
    assert_eq!(dates, vec!["4 Avr. 04", "3 Mar. 03", "2 Fév. 02", "1 Jan. 01"]);
}

#[tokio::test]
async fn test_get_bills_formats_status_labels() {
    let ctx = TestContext::new(fixture_bills());

    let bills = ctx.bill_list().get_bills().await.unwrap();

    let statuses: Vec<&str> = bills.iter().map(|b| b.status.as_str()).collect();
    assert_eq!(statuses, vec!["En attente", "Accepté", "Refusé", "Refusé"]);
    assert_eq!(bills[0].vat, Some(80.0));
    assert_eq!(bills[3].vat, None);
}

#[tokio::test]
async fn test_malformed_bills_are_kept_raw() {
    let mut bills = fixture_bills();
    bills.insert(
        1,
        RawBill {
            id: "broken-date".to_string(),
            email: Some(EMPLOYEE_EMAIL.to_string()),
            date: Some("31/12/2020".to_string()),
            status: Some("pending".to_string()),
            ..RawBill::default()
        },
    );
    bills.push(RawBill {
        id: "unknown-status".to_string(),
        email: Some(EMPLOYEE_EMAIL.to_string()),
        date: Some("2005-05-05".to_string()),
        status: Some("archived".to_string()),
        ..RawBill::default()
    });
    let ctx = TestContext::new(bills);

    let displayed = ctx.bill_list().get_bills().await.unwrap();

    assert_eq!(displayed.len(), 6);
    // A parsable date still sorts even when the status is unknown.
    assert_eq!(displayed[0].id, "unknown-status");
    assert_eq!(displayed[0].date, "2005-05-05");
    assert_eq!(displayed[0].status, "archived");
    assert!(displayed[0].is_malformed());
    // Unparsable dates go last.
    let last = displayed.last().unwrap();
    assert_eq!(last.id, "broken-date");
    assert_eq!(last.date, "31/12/2020");
    assert_eq!(last.status, "pending");

    let logs = ctx.logging.get_logs().await.unwrap();
    assert_eq!(logs.iter().filter(|l| l.action == MALFORMED_BILL).count(), 2);
}

#[tokio::test]
async fn test_list_failure_404_is_rendered() {
    let ctx = TestContext::new(fixture_bills());
    ctx.store.fail_next_list(RemoteError::new(404, "Erreur 404")).await;

    let page = ctx.bill_list().load_page().await;

    assert_eq!(page, BillsPageView::Error("Erreur 404".to_string()));
    assert!(page.render_text().contains("Erreur 404"));
}

#[tokio::test]
async fn test_list_failure_500_is_rendered_and_journaled() {
    let ctx = TestContext::new(fixture_bills());
    ctx.store.fail_next_list(RemoteError::from_status(500)).await;
    let controller = ctx.bill_list();

    let result = controller.get_bills().await;
    assert!(matches!(result, Err(BilledError::Remote(ref e)) if e.status == 500));

    ctx.store.fail_next_list(RemoteError::from_status(500)).await;
    let page = controller.load_page().await;
    assert!(page.render_text().contains("Erreur 500"));

    let logs = ctx.logging.get_logs().await.unwrap();
    assert!(logs.iter().any(|l| l.action == BILLS_LIST_FAILED));
}

#[tokio::test]
async fn test_list_failure_is_not_retried() {
    let ctx = TestContext::new(fixture_bills());
    ctx.store.fail_next_list(RemoteError::from_status(500)).await;

    let _ = ctx.bill_list().get_bills().await;

    assert_eq!(ctx.store.list_calls(), 1);
}

#[tokio::test]
async fn test_results_for_a_left_page_are_discarded() {
    let ctx = TestContext::new(fixture_bills());
    let controller = ctx.bill_list();
    controller.page().leave();

    let result = controller.get_bills().await;

    assert!(matches!(result, Err(BilledError::ViewDetached)));
}

#[tokio::test]
async fn test_click_new_bill_navigates_without_network() {
    let ctx = TestContext::new(fixture_bills());

    ctx.bill_list().handle_click_new_bill();

    assert_eq!(ctx.navigator.last(), Some(Route::NewBill));
    assert_eq!(ctx.store.list_calls(), 0);
}

#[tokio::test]
async fn test_click_eye_opens_receipt_at_half_modal_width() {
    let ctx = TestContext::new(fixture_bills());
    let controller = ctx.bill_list();
    let bills = controller.get_bills().await.unwrap();

    for bill in &bills {
        let icon = ReceiptIcon {
            bill_url: bill.file_url.clone(),
        };
        let preview = controller.handle_click_icon_eye(&icon, 801);
        assert_eq!(
            preview,
            ReceiptPreview::Image {
                url: bill.file_url.clone().unwrap(),
                width: 400,
            }
        );
    }
}

#[tokio::test]
async fn test_click_eye_without_receipt_shows_placeholder() {
    let ctx = TestContext::new(Vec::new());
    let controller = ctx.bill_list();

    for bill_url in [None, Some("".to_string()), Some("null".to_string())] {
        let preview = controller.handle_click_icon_eye(&ReceiptIcon { bill_url }, 600);
        assert_eq!(
            preview,
            ReceiptPreview::Missing {
                message: NO_RECEIPT_MESSAGE.to_string()
            }
        );
    }
}

#[tokio::test]
async fn test_controller_requires_a_session() {
    let ctx = TestContext::new(fixture_bills());

    let result = BillListController::new(
        ctx.store.clone(),
        ctx.logging.clone(),
        ctx.navigator.clone(),
        &StaticSession::anonymous(),
    );

    assert!(matches!(result, Err(BilledError::MissingSession)));
}

#[tokio::test]
async fn test_scoped_store_only_lists_own_bills() {
    let mut bills = fixture_bills();
    bills.push(RawBill {
        id: "someone-else".to_string(),
        email: Some("b@b".to_string()),
        date: Some("2010-10-10".to_string()),
        status: Some("pending".to_string()),
        ..RawBill::default()
    });
    let ctx = TestContext::new(bills);
    let scoped = std::sync::Arc::new(ctx.store.scoped_to(EMPLOYEE_EMAIL));
    let controller = BillListController::new(scoped, ctx.logging.clone(), ctx.navigator.clone(), &ctx.session).unwrap();

    let displayed = controller.get_bills().await.unwrap();

    assert_eq!(displayed.len(), 4);
    assert!(displayed.iter().all(|b| b.id != "someone-else"));
}
