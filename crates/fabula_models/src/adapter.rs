//! Provider dispatch by explicit tag.

use crate::{ClientConfig, GeminiClient, OpenAiClient};
use fabula_engine::ProviderId;
use fabula_error::ModelsResult;
use fabula_interface::{DriverSet, ImageDriver, TextDriver};

/// One adapter per provider, selected by the resolved engine definition's
/// provider field.
///
/// Construction never fails on missing credentials; those surface as
/// `AuthMissing` when a call is actually routed to the unconfigured
/// provider.
#[derive(Debug, Clone)]
pub struct AdapterSet {
    openai: OpenAiClient,
    gemini: GeminiClient,
}

impl AdapterSet {
    /// Build the adapter set from environment credentials.
    pub fn from_env(config: &ClientConfig) -> ModelsResult<Self> {
        Ok(Self {
            openai: OpenAiClient::from_env(config)?,
            gemini: GeminiClient::from_env(config)?,
        })
    }

    /// Build from explicit clients (tests, alternate endpoints).
    pub fn new(openai: OpenAiClient, gemini: GeminiClient) -> Self {
        Self { openai, gemini }
    }

}

impl DriverSet for AdapterSet {
    fn text_driver(&self, provider: ProviderId) -> &dyn TextDriver {
        match provider {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Gemini => &self.gemini,
        }
    }

    fn image_driver(&self, provider: ProviderId) -> &dyn ImageDriver {
        match provider {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Gemini => &self.gemini,
        }
    }
}
