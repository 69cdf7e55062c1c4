//! Fetching the watched resource.
//!
//! This module provides:
//! - The [`PageFetcher`] trait, the seam between the monitor loop and HTTP
//! - [`HttpPageFetcher`], the production implementation over [`crate::net`]
//! - [`FetchError`], the per-cycle failure taxonomy

mod page;


pub use page::HttpPageFetcher;

use thiserror::Error;

use crate::net::HttpError;

/// Error type for a single fetch cycle.
///
/// Fetch failures are recoverable by design: the monitor loop reports them
/// through the status sink and retries on the next tick. None of these
/// variants terminate the loop.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server did not respond within the request timeout.
    #[error("request timed out")]
    Timeout,

    /// Network-level failure (DNS, connect, TLS, read).
    #[error("network error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server responded with a non-2xx status.
    #[error("unexpected status: {status}")]
    Status {
        /// The non-success status code returned by the server.
        status: http::StatusCode,
    },
}

impl From<HttpError> for FetchError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout => Self::Timeout,
            HttpError::Connection(source) => Self::Connection(source),
            // The monitor validates the URL up front; reaching this at fetch
            // time still maps to a connection-class failure for the cycle.
            HttpError::InvalidUrl(reason) => Self::Connection(reason.into()),
        }
    }
}

/// Trait for retrieving the raw body of the watched resource.
///
/// The monitor loop is generic over this trait so tests can script
/// fetch outcomes without a network.
pub trait PageFetcher: Send + Sync {
    /// Fetches the resource and returns the exact response bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on timeout, network failure, or a non-2xx
    /// response status.
    fn fetch(
        &self,
        url: &url::Url,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, FetchError>> + Send;
}
