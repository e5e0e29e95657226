use std::sync::Arc;

use mockito::ServerGuard;

use crate::banks::{BANKS_EMPTY, BANKS_HEADING, BANKS_UNAVAILABLE};
use crate::testutils::{backend, dead_backend, view, RecordingView};
use crate::{BankAccount, BankAccountLister, BankListing, Region};

// ─── Helpers ─────────────────────────────────────────────

async fn serve(status: usize, body: &str) -> (ServerGuard, Arc<RecordingView>, BankListing) {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/bank-accounts")
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;
    let view = view();
    let listing = BankAccountLister::new(backend(&server), view.clone()).load().await;
    (server, view, listing)
}

// ─── Tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_accounts_rendered_as_choices() {
    let body = r#"[
        {"id":1,"bank_name":"Bank A","account_name":"Charity","account_number":"012345","bank_type":"savings","active":true},
        {"id":2,"bank_name":"Bank B","account_name":"Charity B"}
    ]"#;
    let (_server, view, listing) = serve(200, body).await;

    assert_eq!(listing.accounts().len(), 2);
    assert_eq!(view.text(Region::BankAccounts), BANKS_HEADING);
    let rendered = view.banks();
    assert_eq!(rendered[0].label(), "Bank A - Charity - 012345 (savings)");
    assert_eq!(rendered[1].label(), "Bank B - Charity B");
    assert_eq!(rendered[1].id, 2);
}

#[tokio::test]
async fn test_empty_list_shows_message() {
    let (_server, view, listing) = serve(200, "[]").await;

    assert_eq!(listing, BankListing::Empty);
    assert_eq!(view.text(Region::BankAccounts), BANKS_EMPTY);
    assert!(view.banks().is_empty());
}

#[tokio::test]
async fn test_null_list_counts_as_empty() {
    let (_server, view, listing) = serve(200, "null").await;

    assert_eq!(listing, BankListing::Empty);
    assert_eq!(view.text(Region::BankAccounts), BANKS_EMPTY);
}

#[tokio::test]
async fn test_server_error_shows_unavailable() {
    let (_server, view, listing) = serve(500, r#"{"message":"db down"}"#).await;

    assert!(matches!(listing, BankListing::Unavailable(_)));
    assert_eq!(view.text(Region::BankAccounts), BANKS_UNAVAILABLE);
}

#[tokio::test]
async fn test_malformed_list_shows_error() {
    let (_server, view, listing) = serve(200, r#"{"accounts":[]}"#).await;

    assert!(matches!(listing, BankListing::Unavailable(_)));
    assert!(view
        .text(Region::BankAccounts)
        .starts_with("Error loading bank accounts: "));
}

#[tokio::test]
async fn test_unreachable_backend_never_leaves_container_blank() {
    let view = view();
    let listing = BankAccountLister::new(dead_backend(), view.clone()).load().await;

    assert!(listing.accounts().is_empty());
    assert!(view
        .text(Region::BankAccounts)
        .starts_with("Error loading bank accounts: "));
}

#[tokio::test]
async fn test_reload_overwrites_container() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/bank-accounts")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let view = view();
    let lister = BankAccountLister::new(backend(&server), view.clone());

    lister.load().await;
    lister.load().await;

    assert_eq!(view.text(Region::BankAccounts), BANKS_EMPTY);
}

#[test]
fn test_label_skips_blank_optional_fields() {
    let account = BankAccount {
        id: 9,
        bank_name: "Bank C".into(),
        account_name: "Relief".into(),
        account_number: Some(String::new()),
        bank_type: None,
    };
    assert_eq!(account.label(), "Bank C - Relief");
}
