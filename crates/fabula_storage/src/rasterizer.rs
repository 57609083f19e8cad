//! Client for the third-party PDF page rasterization service.

use async_trait::async_trait;
use fabula_error::{ConfigError, FabulaResult, HttpError, JsonError};
use fabula_interface::PageRasterizer;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

const PDFCO_ENDPOINT: &str = "https://api.pdf.co/v1/pdf/convert/to/png";
const PDFCO_KEY_VAR: &str = "PDFCO_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ConvertRequest<'a> {
    url: &'a str,
    pages: &'a str,
    r#async: bool,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    urls: Option<Vec<String>>,
}

/// PDF.co client: converts one PDF page (reachable at a public URL) to a
/// PNG and returns the image URL.
///
/// The service answers with either a direct `url` or a `urls` list; the
/// first entry is taken.
#[derive(Debug, Clone)]
pub struct PdfCoRasterizer {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
}

impl PdfCoRasterizer {
    /// Create a client reading the credential from `PDFCO_API_KEY`.
    pub fn from_env() -> FabulaResult<Self> {
        Self::build(std::env::var(PDFCO_KEY_VAR).ok())
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>) -> FabulaResult<Self> {
        Self::build(Some(api_key.into()))
    }

    fn build(api_key: Option<String>) -> FabulaResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| HttpError::new(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            endpoint: PDFCO_ENDPOINT.to_string(),
        })
    }

    /// Override the service endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl PageRasterizer for PdfCoRasterizer {
    #[instrument(skip_all, fields(pages = %pages))]
    async fn rasterize(&self, pdf_url: &str, pages: &str) -> FabulaResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConfigError::new(format!("{} is not set", PDFCO_KEY_VAR))
        })?;

        debug!("Requesting PDF page rasterization");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("content-type", "application/json")
            .json(&ConvertRequest {
                url: pdf_url,
                pages,
                r#async: false,
            })
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Rasterization request failed");
                HttpError::new(format!("rasterization request failed: {}", e))
            })?;

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(status = %status, body = %raw, "Rasterization service returned error");
            return Err(HttpError::new(format!(
                "rasterization service returned status {}",
                status
            ))
            .into());
        }

        let parsed: ConvertResponse = serde_json::from_str(&raw).map_err(|e| {
            error!(error = %e, "Failed to parse rasterization response");
            JsonError::new(format!("rasterization response was not valid JSON: {}", e))
        })?;

        parsed
            .url
            .or_else(|| parsed.urls.and_then(|urls| urls.into_iter().next()))
            .ok_or_else(|| {
                error!("Rasterization response carried no url");
                JsonError::new("rasterization response carried no url or urls entry").into()
            })
    }
}
