use std::sync::Arc;

use billed::containers::{BillsConfig, BillsController, NewBillConfig, NewBillController, SubmissionState};
use billed::models::{NewBillForm, ReceiptFile, User, UserType};
use billed::navigation::{HistoryNavigator, Route};
use billed::overlay::ModalOverlay;
use billed::page::RenderTarget;
use billed::session::MemorySessionStore;
use billed::store::MemoryStore;
use billed::views::bills::BillsState;
use billed::BilledError;

const ROW_SELECTOR: &str = "[data-testid=\"bill-row\"]";

fn bills_controller(store: Arc<MemoryStore>, navigator: Arc<HistoryNavigator>) -> BillsController {
    BillsController::new(
        BillsConfig::new(RenderTarget::new())
            .with_store(store)
            .with_navigator(navigator)
            .with_overlay(Box::new(ModalOverlay::new(800))),
    )
    .unwrap()
}

fn new_bill_controller(store: Arc<MemoryStore>, navigator: Arc<HistoryNavigator>) -> NewBillController {
    let session = MemorySessionStore::with_user(&User {
        user_type: UserType::Employee,
        email: "a@a".to_string(),
    })
    .unwrap();

    NewBillController::new(
        NewBillConfig::new(RenderTarget::new())
            .with_store(store)
            .with_navigator(navigator)
            .with_session(Arc::new(session)),
    )
    .unwrap()
}

fn filled_form() -> NewBillForm {
    NewBillForm {
        bill_type: "Restaurants et bars".to_string(),
        name: "Déjeuner client".to_string(),
        date: "2005-05-05".to_string(),
        amount: "42.5".to_string(),
        vat: "7".to_string(),
        pct: "20".to_string(),
        commentary: String::new(),
    }
}

#[tokio::test]
async fn list_fetch_with_four_records_renders_four_rows() {
    let store = Arc::new(MemoryStore::with_fixtures());
    let mut bills = bills_controller(store, Arc::new(HistoryNavigator::new()));

    bills.initialize(None, None).await;

    assert!(bills.state().is_ready());
    assert_eq!(bills.target().count(ROW_SELECTOR).unwrap(), 4);
}

#[tokio::test]
async fn list_fetch_rejection_renders_error_panel() {
    let store = Arc::new(MemoryStore::with_fixtures());
    store.fail_next_list("Erreur 404");
    let mut bills = bills_controller(store, Arc::new(HistoryNavigator::new()));

    bills.initialize(None, None).await;

    assert_eq!(bills.state(), &BillsState::Error("Erreur 404".to_string()));
    assert!(bills
        .target()
        .text_of("[data-testid=\"error-message\"]")
        .unwrap()
        .contains(&"Erreur 404".to_string()));
}

#[tokio::test]
async fn submit_with_exe_receipt_is_blocked() {
    let store = Arc::new(MemoryStore::new());
    let navigator = Arc::new(HistoryNavigator::new());
    let mut new_bill = new_bill_controller(store.clone(), navigator.clone());

    let chosen = new_bill.on_file_chosen(ReceiptFile::new("image.exe", vec![0; 4]));
    assert!(matches!(chosen, Err(BilledError::InvalidFileType(_))));
    assert!(new_bill.on_submit(filled_form()).await.is_err());

    assert!(new_bill
        .target()
        .has_class("[data-testid=\"errorFile\"]", "showErrorMessage")
        .unwrap());
    assert_eq!(store.create_calls(), 0);
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn submit_with_png_receipt_creates_and_returns_to_list() {
    let store = Arc::new(MemoryStore::with_fixtures());
    let navigator = Arc::new(HistoryNavigator::new());

    let mut bills = bills_controller(store.clone(), navigator.clone());
    bills.initialize(None, None).await;
    bills.on_new_bill_requested();
    assert_eq!(navigator.current(), Some(Route::NewBill));

    let mut new_bill = new_bill_controller(store.clone(), navigator.clone());
    new_bill
        .on_file_chosen(ReceiptFile::new("image.png", vec![0; 4]))
        .unwrap();
    new_bill.on_submit(filled_form()).await.unwrap();

    assert_eq!(store.create_calls(), 1);
    let draft = &store.created()[0];
    assert_eq!(draft.file_name, "image.png");
    assert!(!draft.file_url.is_empty());
    assert_eq!(new_bill.state(), SubmissionState::Created);
    assert_eq!(navigator.current(), Some(Route::Bills));

    // Back on the list, the new bill is the most recent row
    let mut bills = bills_controller(store.clone(), navigator);
    bills.initialize(None, None).await;
    assert_eq!(bills.target().count(ROW_SELECTOR).unwrap(), 5);
    let dates = bills
        .target()
        .attribute_values("[data-testid=\"bill-date\"]", "data-date")
        .unwrap();
    assert_eq!(dates[0], "2005-05-05");
}
