//! End-to-end flow: real provider over HTTP, mocked mail handler.

mod mocks;

use dve_contact_form::config::{Config, ProviderConfig};
use dve_contact_form::delivery::{build_provider, BlockingDelivery};
use dve_contact_form::form::{ContactForm, FormState, SubmitOutcome};
use dve_contact_form::{Fallback, Metrics, RawFields};
use mocks::MockMailHandler;
use mockito::Server;
use std::net::TcpListener;
use std::sync::Arc;

fn config_for(url: String) -> Config {
    Config {
        provider: ProviderConfig::Web3Forms {
            url,
            access_key: "test-access-key".to_string(),
        },
        request_timeout: 5,
        ..Config::default()
    }
}

/// Accepts connections and holds them open without ever replying.
fn silent_listener() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    format!("http://{}/submit", addr)
}

fn form(config: &Config, handler: &MockMailHandler) -> ContactForm {
    let mut state = FormState::new();
    state.set_name("Ivan");
    state.set_email("ivan@example.com");
    state.set_phone("+7 999 123 4567");
    state.set_message("Hello, I am interested in a property.");

    let metrics = Metrics::new();
    let provider = build_provider(config, metrics.clone());

    ContactForm::new(
        state.shared(),
        Arc::new(BlockingDelivery::new(provider)),
        Fallback::new(config.recipient.clone(), Arc::new(handler.clone())),
        metrics,
    )
}

#[tokio::test]
async fn test_http_200_success_is_delivered() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/submit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .expect(1)
        .create_async()
        .await;

    let handler = MockMailHandler::new();
    let form = form(&config_for(format!("{}/submit", server.url())), &handler);

    let outcome = form.handle_submit().await;

    mock.assert_async().await;
    assert!(matches!(outcome, SubmitOutcome::Delivered(_)));
    assert!(!form.state().lock().unwrap().is_busy());
    assert!(handler.opened().is_empty());
    assert_eq!(form.metrics().http_requests_total(), 1);
}

#[tokio::test]
async fn test_http_500_hands_off_to_mail_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/submit")
        .with_status(500)
        .with_body(r#"{"success": false}"#)
        .expect(1)
        .create_async()
        .await;

    let handler = MockMailHandler::new();
    let form = form(&config_for(format!("{}/submit", server.url())), &handler);

    let outcome = form.handle_submit().await;

    // Exactly one request: no retries before the fallback.
    mock.assert_async().await;
    match outcome {
        SubmitOutcome::HandedOff(handoff) => {
            assert!(handoff.ack.handed_off);
            assert_eq!(handler.opened(), vec![handoff.link.uri()]);
            assert!(handoff.link.body().contains("+7 999 123 4567"));
        }
        other => panic!("Expected HandedOff, got: {:?}", other),
    }
    assert!(!form.state().lock().unwrap().is_busy());
}

#[tokio::test]
async fn test_network_failure_hands_off_to_mail_client() {
    let handler = MockMailHandler::new();
    let form = form(&config_for("http://127.0.0.1:9/submit".to_string()), &handler);

    let outcome = form.handle_submit().await;

    assert!(matches!(outcome, SubmitOutcome::HandedOff(_)));
    assert_eq!(handler.opened().len(), 1);
    assert_eq!(form.metrics().delivery_errors_total(), 1);
}

#[tokio::test]
async fn test_invalid_form_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/submit")
        .expect(0)
        .create_async()
        .await;

    let handler = MockMailHandler::new();
    let form = form(&config_for(format!("{}/submit", server.url())), &handler);
    form.state()
        .lock()
        .unwrap()
        .set_fields(RawFields::new("I", "ivan@example.com", None, "too short"));

    let outcome = form.handle_submit().await;

    mock.assert_async().await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert!(handler.opened().is_empty());
}

#[tokio::test]
async fn test_success_false_hands_off_to_mail_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/submit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "Invalid access key"}"#)
        .expect(1)
        .create_async()
        .await;

    let handler = MockMailHandler::new();
    let form = form(&config_for(format!("{}/submit", server.url())), &handler);

    let outcome = form.handle_submit().await;

    mock.assert_async().await;
    assert!(matches!(outcome, SubmitOutcome::HandedOff(ref h) if h.ack.handed_off));
    assert_eq!(handler.opened().len(), 1);
    assert_eq!(form.metrics().delivery_errors_total(), 1);
    assert_eq!(form.metrics().fallbacks_total(), 1);
}

#[tokio::test]
async fn test_request_timeout_hands_off_to_mail_client() {
    let config = Config {
        request_timeout: 1,
        ..config_for(silent_listener())
    };
    let handler = MockMailHandler::new();
    let form = form(&config, &handler);

    let outcome = form.handle_submit().await;

    assert!(matches!(outcome, SubmitOutcome::HandedOff(_)));
    assert_eq!(handler.opened().len(), 1);
    assert_eq!(form.metrics().delivery_errors_total(), 1);
    assert!(!form.state().lock().unwrap().is_busy());
}
