//! Tests for `TelegramNotifier`.

use super::telegram::TelegramNotifier;
use super::{Notifier, NotifyError};
use crate::net::{HttpClient, HttpError, HttpRequest, HttpResponse};

use std::sync::Mutex;

struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn ok() -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            br#"{"ok":true}"#.to_vec(),
        ))])
    }

    fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (*self).request(req).await
    }
}

#[tokio::test]
async fn sends_form_encoded_post_to_bot_endpoint() {
    let client = MockClient::ok();
    let notifier = TelegramNotifier::new(&client, "123:abc", "42");

    notifier.send("hello").await.unwrap();

    let req = client.last_request();
    assert_eq!(req.method, http::Method::POST);
    assert_eq!(
        req.url.as_str(),
        "https://api.telegram.org/bot123:abc/sendMessage"
    );
    assert_eq!(
        req.headers.get(http::header::CONTENT_TYPE).unwrap(),
        "application/x-www-form-urlencoded"
    );
}

#[tokio::test]
async fn body_carries_chat_id_text_and_parse_mode() {
    let client = MockClient::ok();
    let notifier = TelegramNotifier::new(&client, "123:abc", "42");

    notifier.send("Change detected on:\nhttps://example.com/").await.unwrap();

    let body = String::from_utf8(client.last_request().body.unwrap()).unwrap();
    assert!(body.contains("chat_id=42"));
    assert!(body.contains("parse_mode=Markdown"));
    // Form encoding escapes the newline and the URL.
    assert!(body.contains("text=Change+detected+on%3A%0Ahttps%3A%2F%2Fexample.com%2F"));
}

#[tokio::test]
async fn non_200_status_is_rejected() {
    let client = MockClient::new(vec![Ok(HttpResponse::new(
        http::StatusCode::UNAUTHORIZED,
        http::HeaderMap::new(),
        br#"{"ok":false,"description":"Unauthorized"}"#.to_vec(),
    ))]);
    let notifier = TelegramNotifier::new(&client, "bad-token", "42");

    let err = notifier.send("hello").await.unwrap_err();

    match err {
        NotifyError::Rejected { status, detail } => {
            assert_eq!(status, http::StatusCode::UNAUTHORIZED);
            assert!(detail.unwrap().contains("Unauthorized"));
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_failure_is_reported_not_panicked() {
    let client = MockClient::new(vec![Err(HttpError::Connection(Box::new(
        std::io::Error::other("host unreachable"),
    )))]);
    let notifier = TelegramNotifier::new(&client, "123:abc", "42");

    let err = notifier.send("hello").await.unwrap_err();

    assert!(matches!(err, NotifyError::Transport(_)));
}

#[tokio::test]
async fn timeout_is_a_transport_failure() {
    let client = MockClient::new(vec![Err(HttpError::Timeout)]);
    let notifier = TelegramNotifier::new(&client, "123:abc", "42");

    let err = notifier.send("hello").await.unwrap_err();

    assert!(matches!(err, NotifyError::Transport(HttpError::Timeout)));
}

#[tokio::test]
async fn api_base_override_is_used() {
    let client = MockClient::ok();
    let notifier =
        TelegramNotifier::new(&client, "t", "1").with_api_base("http://localhost:8081");

    notifier.send("x").await.unwrap();

    assert_eq!(
        client.last_request().url.as_str(),
        "http://localhost:8081/bott/sendMessage"
    );
}

#[test]
fn debug_output_redacts_token() {
    let notifier = TelegramNotifier::new(MockClient::ok(), "secret-token", "42");
    let debug = format!("{notifier:?}");

    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("<redacted>"));
    assert!(debug.contains("42"));
}
