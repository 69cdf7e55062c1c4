//! Per-run monitor parameters.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Error for parameters a monitor run cannot be started with.
///
/// Raised at construction time, never during the loop.
#[derive(Debug, Error)]
pub enum InvalidConfig {
    /// The resource locator is not a well-formed absolute URL.
    #[error("'{url}' is not a valid absolute URL: {reason}")]
    MalformedUrl {
        /// The rejected input.
        url: String,
        /// Parser's description of the problem.
        reason: String,
    },

    /// The locator parses but uses a scheme the fetcher cannot handle.
    #[error("unsupported URL scheme '{scheme}': expected http or https")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// The polling interval is below the one-second tick granularity.
    #[error("polling interval must be at least one second")]
    IntervalTooShort,
}

/// Validated parameters for one monitor run.
///
/// Immutable for the lifetime of the run. Validation happens here so
/// [`super::ChangeMonitor::start`] cannot fail on malformed input.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    url: Url,
    interval: Duration,
}

impl MonitorConfig {
    /// Parses and validates a resource locator and polling interval.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`] if the locator is not an absolute
    /// http(s) URL or the interval is shorter than one second.
    pub fn new(url: &str, interval: Duration) -> Result<Self, InvalidConfig> {
        let parsed = Url::parse(url).map_err(|e| InvalidConfig::MalformedUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(parsed, interval)
    }

    /// Validates an already-parsed URL and polling interval.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig`] if the scheme is not http(s) or the
    /// interval is shorter than one second.
    pub fn from_url(url: Url, interval: Duration) -> Result<Self, InvalidConfig> {
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(InvalidConfig::UnsupportedScheme {
                    scheme: other.to_string(),
                });
            }
        }

        if interval < Duration::from_secs(1) {
            return Err(InvalidConfig::IntervalTooShort);
        }

        Ok(Self { url, interval })
    }

    /// Returns the watched resource locator.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Returns the polling interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the interval in whole seconds (the countdown tick count).
    #[must_use]
    pub const fn interval_secs(&self) -> u64 {
        self.interval.as_secs()
    }
}
