//! Shared HTTP client configuration for provider adapters.

use fabula_error::{ModelsError, ModelsErrorKind, ModelsResult};
use std::time::Duration;

/// Default per-request timeout for provider calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration applied to every adapter's HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Hard deadline for a single provider call, connect included
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with an explicit timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Build a reqwest client honoring this configuration.
    pub(crate) fn build_http_client(&self) -> ModelsResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                ModelsError::new(ModelsErrorKind::Transport(format!(
                    "failed to build HTTP client: {}",
                    e
                )))
            })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
