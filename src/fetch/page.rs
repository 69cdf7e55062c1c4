//! HTTP implementation of the page fetcher.

use tracing::debug;
use url::Url;

use crate::net::{HttpClient, HttpRequest};

use super::{FetchError, PageFetcher};

/// Fetches the watched page with a plain HTTP GET.
///
/// Non-2xx responses are treated as fetch failures; redirects are followed
/// by the underlying client. The body is returned as raw bytes so the
/// digest covers exactly what the server sent.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher<H> {
    client: H,
}

impl<H> HttpPageFetcher<H> {
    /// Creates a page fetcher over the given HTTP client.
    ///
    /// The client is expected to carry the request timeout
    /// (see [`crate::net::ReqwestClient::with_timeout`]).
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self { client }
    }
}

impl<H: HttpClient> PageFetcher for HttpPageFetcher<H> {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!("fetching {url}");

        let response = self.client.request(HttpRequest::get(url.clone())).await?;

        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        debug!("fetched {url}: {} bytes", response.body.len());
        Ok(response.body)
    }
}
