//! HTTP URL fetcher.

use async_trait::async_trait;
use fabula_error::{FabulaResult, HttpError};
use fabula_interface::UrlFetcher;
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// [`UrlFetcher`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpUrlFetcher {
    client: reqwest::Client,
}

impl HttpUrlFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> FabulaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| HttpError::new(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlFetcher for HttpUrlFetcher {
    async fn fetch(&self, url: &str) -> FabulaResult<Vec<u8>> {
        debug!(url = %url, "Fetching remote resource");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, "Failed to fetch remote resource");
            HttpError::new(format!("fetch failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Remote resource returned error");
            return Err(HttpError::new(format!(
                "fetch of {} returned status {}",
                url, status
            ))
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            error!(error = ?e, "Failed to read remote resource body");
            HttpError::new(format!("failed to read body: {}", e))
        })?;

        Ok(bytes.to_vec())
    }
}
