//! Delivering change notifications.
//!
//! This module provides:
//! - The [`Notifier`] trait, the capability the monitor loop invokes on change
//! - [`TelegramNotifier`], the production Telegram Bot API implementation
//! - [`DryRunNotifier`], a logging stand-in for trial runs
//! - [`MessageTemplate`], the rendered notification text

mod message;
mod telegram;

#[cfg(test)]
mod telegram_tests;

pub use message::{DEFAULT_TEMPLATE, MessageTemplate, TemplateError};
pub use telegram::TelegramNotifier;

use thiserror::Error;

use crate::net::HttpError;

/// Error type for notification delivery.
///
/// Notification failures are recoverable by design: the monitor loop logs
/// them and continues; digest state is unaffected.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport-level failure (timeout, connection, TLS).
    #[error("notification transport failed: {0}")]
    Transport(#[from] HttpError),

    /// The messaging API responded with a non-success status.
    #[error("notification rejected: status {status}")]
    Rejected {
        /// The non-success status code returned by the API.
        status: http::StatusCode,
        /// Response body excerpt, if it was readable text.
        detail: Option<String>,
    },
}

/// Trait for delivering a short text message to a predetermined recipient.
///
/// The recipient (chat, channel, address) is part of the implementation's
/// configuration; the monitor only supplies the message text.
pub trait Notifier: Send + Sync {
    /// Delivers one message.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] if the transport fails or the API rejects
    /// the message.
    fn send(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<(), NotifyError>> + Send;
}

/// Notifier that logs the message instead of sending it.
///
/// Used in dry-run mode so the poll/digest loop can be exercised without
/// Telegram credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunNotifier;

impl Notifier for DryRunNotifier {
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        tracing::info!("dry-run: would send notification: {message}");
        Ok(())
    }
}
