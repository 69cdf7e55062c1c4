//! Telegram Bot API notifier.

use std::fmt;

use http::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;
use url::form_urlencoded;

use crate::net::{HttpClient, HttpRequest};

use super::{Notifier, NotifyError};

/// Default Telegram Bot API endpoint.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Sends messages to a Telegram chat via the Bot API.
///
/// Messages are submitted as a form-encoded POST to
/// `<api_base>/bot<token>/sendMessage` with fields `chat_id`, `text`,
/// and `parse_mode=Markdown`. Any non-200 response counts as a failure.
#[derive(Clone)]
pub struct TelegramNotifier<H> {
    client: H,
    token: String,
    chat_id: String,
    api_base: String,
}

impl<H> TelegramNotifier<H> {
    /// Creates a notifier for the given bot token and chat id.
    pub fn new(client: H, token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL.
    ///
    /// Intended for tests and self-hosted Bot API servers.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Returns the configured chat id.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    fn endpoint(&self) -> Result<Url, NotifyError> {
        let raw = format!("{}/bot{}/sendMessage", self.api_base, self.token);
        Url::parse(&raw)
            .map_err(|e| NotifyError::Transport(crate::net::HttpError::InvalidUrl(e.to_string())))
    }

    fn form_body(&self, message: &str) -> Vec<u8> {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("chat_id", &self.chat_id)
            .append_pair("text", message)
            .append_pair("parse_mode", "Markdown")
            .finish()
            .into_bytes()
    }
}

// The token is a credential; keep it out of debug output.
impl<H> fmt::Debug for TelegramNotifier<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl<H: HttpClient> Notifier for TelegramNotifier<H> {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let request = HttpRequest::post(self.endpoint()?)
            .with_header(
                CONTENT_TYPE,
                http::HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .with_body(self.form_body(message));

        let response = self.client.request(request).await?;

        if response.status != http::StatusCode::OK {
            return Err(NotifyError::Rejected {
                status: response.status,
                detail: response.body_text().map(|s| truncate(s, 200)),
            });
        }

        debug!("notification delivered to chat {}", self.chat_id);
        Ok(())
    }
}

/// Clips an API error body to a loggable length.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
