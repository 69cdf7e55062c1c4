//! Status reporting from the monitor loop.
//!
//! The loop reports one event per cycle step through a [`StatusSink`]
//! supplied at start. Sinks are invoked synchronously from the loop task,
//! so implementations must be cheap and `Send + Sync`; a UI layer that
//! needs thread affinity should forward events to its own channel.

use std::fmt;

/// Severity of a status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Routine progress (a check is starting).
    Info,
    /// A cycle completed successfully.
    Success,
    /// A cycle step failed; the loop continues.
    Error,
}

/// One status update from the monitor loop.
#[derive(Debug, Clone)]
pub struct StatusEvent {
    /// Human-readable status line.
    pub text: String,
    /// Severity classification for display purposes.
    pub severity: Severity,
}

impl StatusEvent {
    /// A check is starting.
    pub(crate) fn checking(url: &url::Url) -> Self {
        Self {
            text: format!("checking {url}"),
            severity: Severity::Info,
        }
    }

    /// A check completed; the next one runs after the interval.
    pub(crate) fn checked(interval_secs: u64) -> Self {
        let now = chrono::Local::now().format("%H:%M:%S");
        Self {
            text: format!("ok: checked at {now}, next in {interval_secs}s"),
            severity: Severity::Success,
        }
    }

    /// A cycle step failed.
    pub(crate) fn error(cause: &dyn fmt::Display) -> Self {
        Self {
            text: format!("error: {cause}"),
            severity: Severity::Error,
        }
    }

    /// Returns true for [`Severity::Error`] events.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Receiver for monitor status events.
///
/// Closures work directly: `monitor.start(config, |event| println!("{event}"))`.
pub trait StatusSink: Send + Sync {
    /// Handles one status event.
    fn report(&self, event: StatusEvent);
}

impl<F> StatusSink for F
where
    F: Fn(StatusEvent) + Send + Sync,
{
    fn report(&self, event: StatusEvent) {
        self(event);
    }
}
