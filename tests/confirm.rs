//! Confirmation-code verification and resend.


use fixtures::{CLIENT_ID, harness, harness_with, json, pending_store};
use rider_auth::session::keys;
use rider_auth::{Confirmation, Outcome};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn confirmation_done_establishes_session() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/confirm/abc123"))
        .and(body_json(json!({ "code": "123456" })))
        .respond_with(json(json!({
            "status": "confirmation-done",
            "token": "tok1",
            "client": { "oneId": "abc123" },
            "msg": "ok"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.flow.confirm_account("123456").await;

    assert_eq!(outcome, Outcome::ConfirmationDone);
    assert_eq!(h.stored(keys::AUTH_TOKEN).await.as_deref(), Some("tok1"));
    assert_eq!(h.stored(keys::CLIENT_ID).await.as_deref(), Some("abc123"));
    assert_eq!(h.stored(keys::CONFIRMATION).await.as_deref(), Some("true"));
    assert_eq!(h.stored(keys::VERIFICATION_ID).await, None);
    assert_eq!(h.flow.session().snapshot().confirmation(), Confirmation::Done);
    assert_eq!(h.feedback.loading_counts(), (1, 1));
}

#[tokio::test]
async fn short_code_is_rejected_locally() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    assert_eq!(h.flow.confirm_account("").await, Outcome::ValidationWarning);
    assert_eq!(h.flow.confirm_account("12345").await, Outcome::ValidationWarning);
    assert_eq!(h.feedback.loading_counts(), (2, 2));
}

#[tokio::test]
async fn confirm_without_pending_id_asks_to_reregister() {
    let h = harness().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let outcome = h.flow.confirm_account("123456").await;
    assert!(matches!(outcome, Outcome::Warning { .. }));
    assert!(!outcome.requires_login());
}

#[tokio::test]
async fn client_not_found_clears_session() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/confirm/abc123"))
        .respond_with(json(json!({ "status": "client-not-found", "msg": "no such client" })))
        .mount(&h.server)
        .await;

    let outcome = h.flow.confirm_account("123456").await;
    assert_eq!(outcome, Outcome::ClientNotFound);
    assert!(outcome.requires_login());
    assert!(h.flow.session().snapshot().is_empty());
    assert!(h.store.snapshot().is_empty());
}

#[tokio::test]
async fn wrong_code_keeps_pending_state() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/confirm/abc123"))
        .respond_with(json(json!({ "status": "warning", "msg": "Wrong code" })))
        .mount(&h.server)
        .await;

    let outcome = h.flow.confirm_account("000000").await;
    assert_eq!(
        outcome,
        Outcome::Warning {
            message: "Wrong code".into()
        }
    );
    assert_eq!(h.stored(keys::VERIFICATION_ID).await.as_deref(), Some(CLIENT_ID));
    assert_eq!(h.flow.session().snapshot().confirmation(), Confirmation::Pending);
}

#[tokio::test]
async fn confirm_server_error_is_unknown_error() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/confirm/abc123"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&h.server)
        .await;

    assert_eq!(h.flow.confirm_account("123456").await, Outcome::UnknownError);
    assert_eq!(h.flow.session().snapshot().confirmation(), Confirmation::Pending);
}

#[tokio::test]
async fn resend_relays_server_message() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/send-code-again/abc123"))
        .respond_with(json(json!({ "status": "confirmation-code-sent", "msg": "sent again" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let before = h.store.snapshot();
    assert_eq!(h.flow.resend_confirmation_code().await, Outcome::CodeResent);
    assert_eq!(h.feedback.texts(), vec!["sent again".to_string()]);
    assert_eq!(h.store.snapshot(), before);
}

#[tokio::test]
async fn resend_for_unknown_client_clears_session() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/send-code-again/abc123"))
        .respond_with(json(json!({ "status": "client-not-found", "msg": "no such client" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let outcome = h.flow.resend_confirmation_code().await;

    assert_eq!(outcome, Outcome::ClientNotFound);
    assert!(outcome.requires_login());
    assert_eq!(h.feedback.texts(), vec!["no such client".to_string()]);
    assert!(h.flow.session().snapshot().is_empty());
    assert!(h.store.snapshot().is_empty());
}

#[tokio::test]
async fn resend_with_unknown_status_is_unknown_error() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/send-code-again/abc123"))
        .respond_with(json(json!({ "status": "totally-bogus", "msg": "??" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let before = h.store.snapshot();
    assert_eq!(h.flow.resend_confirmation_code().await, Outcome::UnknownError);
    assert_eq!(h.feedback.texts(), vec!["Something went wrong, please try again.".to_string()]);
    assert_eq!(h.store.snapshot(), before);
}

#[tokio::test]
async fn resend_warning_keeps_pending_confirmation() {
    let h = harness_with(pending_store().await).await;
    Mock::given(method("PUT"))
        .and(path("/auth/send-code-again/abc123"))
        .respond_with(json(json!({ "status": "warning", "msg": "wait a minute" })))
        .mount(&h.server)
        .await;

    assert_eq!(
        h.flow.resend_confirmation_code().await,
        Outcome::Warning {
            message: "wait a minute".into()
        }
    );
    assert_eq!(h.flow.session().snapshot().confirmation(), Confirmation::Pending);
}

#[tokio::test]
async fn resend_without_pending_id_sends_rider_to_login() {
    let h = harness().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let outcome = h.flow.resend_confirmation_code().await;
    assert_eq!(outcome, Outcome::LoginRequired);
    assert!(outcome.requires_login());
    assert!(h.store.snapshot().is_empty());
}
