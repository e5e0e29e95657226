use std::sync::Arc;

use mockito::{Matcher, ServerGuard};

use crate::status::{STATUS_NOT_FOUND, STATUS_PROMPT};
use crate::testutils::{backend, dead_backend, view, RecordingView};
use crate::{DonationStatus, Region, StatusChecker, StatusOutcome};

// ─── Helpers ─────────────────────────────────────────────

async fn setup() -> (ServerGuard, Arc<RecordingView>) {
    (mockito::Server::new_async().await, view())
}

fn checker(server: &ServerGuard, view: &Arc<RecordingView>) -> StatusChecker {
    StatusChecker::new(backend(server), view.clone())
}

// ─── Tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_paid_status_shows_approver_and_time() {
    let (mut server, view) = setup().await;
    let mock = server
        .mock("GET", "/donation-status/DN-1001")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"paid","approved_by":"alice","approved_at":"2024-01-01T00:00:00Z","amount":50000}"#)
        .expect(1)
        .create_async()
        .await;

    let outcome = checker(&server, &view).check("DN-1001").await;

    mock.assert_async().await;
    assert_eq!(
        outcome,
        StatusOutcome::Found(DonationStatus {
            status: "paid".into(),
            approved_by: Some("alice".into()),
            approved_at: Some("2024-01-01T00:00:00Z".into()),
        })
    );
    let texts = view.texts_of(Region::StatusResult);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], "Checking...");
    let text = view.text(Region::StatusResult);
    assert!(text.contains("paid"));
    assert!(text.contains("alice"));
    assert!(text.contains("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_pending_status_shows_status_only() {
    let (mut server, view) = setup().await;
    server
        .mock("GET", "/donation-status/DN-2")
        .with_status(200)
        .with_body(r#"{"status":"pending","reference":"DN-2"}"#)
        .create_async()
        .await;

    checker(&server, &view).check("DN-2").await;

    assert_eq!(view.text(Region::StatusResult), "Status: pending");
}

#[tokio::test]
async fn test_blank_reference_prompts_without_request() {
    let (mut server, view) = setup().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let outcome = checker(&server, &view).check("   ").await;

    mock.assert_async().await;
    assert_eq!(outcome, StatusOutcome::Prompted);
    assert_eq!(view.text(Region::StatusResult), STATUS_PROMPT);
}

#[tokio::test]
async fn test_reference_is_trimmed_and_escaped() {
    let (mut server, view) = setup().await;
    let mock = server
        .mock("GET", "/donation-status/DN%201%2F2")
        .with_status(200)
        .with_body(r#"{"status":"pending"}"#)
        .expect(1)
        .create_async()
        .await;

    checker(&server, &view).check("  DN 1/2 \n").await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unknown_reference_shows_not_found() {
    let (mut server, view) = setup().await;
    server
        .mock("GET", "/donation-status/NOPE")
        .with_status(404)
        .with_body(r#"{"message":"Reference not found"}"#)
        .create_async()
        .await;

    let outcome = checker(&server, &view).check("NOPE").await;

    assert_eq!(outcome, StatusOutcome::NotFound);
    assert_eq!(view.text(Region::StatusResult), STATUS_NOT_FOUND);
}

#[tokio::test]
async fn test_unreachable_backend_shows_network_error() {
    let view = view();
    let outcome = StatusChecker::new(dead_backend(), view.clone())
        .check("DN-1")
        .await;

    assert!(matches!(outcome, StatusOutcome::Failed(_)));
    assert!(view.text(Region::StatusResult).starts_with("Network error: "));
}

#[tokio::test]
async fn test_undecodable_reply_shows_network_error() {
    let (mut server, view) = setup().await;
    server
        .mock("GET", "/donation-status/DN-3")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html/>")
        .create_async()
        .await;

    let outcome = checker(&server, &view).check("DN-3").await;

    assert!(matches!(outcome, StatusOutcome::Failed(_)));
    assert_eq!(
        view.texts_of(Region::StatusResult).first().map(String::as_str),
        Some("Checking...")
    );
    assert!(view.text(Region::StatusResult).starts_with("Network error: "));
}
