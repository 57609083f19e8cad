//! Trait definitions for provider adapters.

use async_trait::async_trait;
use fabula_core::{ChatMessage, GeneratedImage, ImageSize};
use fabula_engine::ProviderId;
use fabula_error::ModelsResult;

/// A text generation backend.
///
/// Implementations translate the canonical message sequence into the
/// provider's wire format, perform the call, and normalize the response into
/// a single reply string. Role vocabulary translation is adapter-local and
/// invisible to callers.
///
/// Every call is best-effort, once: no retry is performed at this layer.
#[async_trait]
pub trait TextDriver: Send + Sync {
    /// Send a chat request and return the assistant reply text.
    ///
    /// # Errors
    ///
    /// - `AuthMissing` if no credential is configured for the provider
    /// - `Transport` on network failure
    /// - `ProviderRejected` on a non-success HTTP response
    /// - `MalformedResponse` / `EmptyReply` if the success response cannot
    ///   be reduced to a single reply string
    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> ModelsResult<String>;

    /// Provider name (e.g. "openai", "gemini").
    fn provider_name(&self) -> &'static str;
}

/// An image generation backend.
///
/// Same failure taxonomy as [`TextDriver`], plus `NoImageData` when the
/// success response carries no decodable image payload. Provider-specific
/// payload constraints (formats the provider rejects) are adapter-local
/// constants, never caller-visible.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Generate a single image for the prompt at the requested size.
    async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        size: ImageSize,
    ) -> ModelsResult<GeneratedImage>;

    /// Provider name (e.g. "openai", "gemini").
    fn provider_name(&self) -> &'static str;
}

/// Dispatch table from provider tags to concrete drivers.
///
/// The orchestrator resolves an engine definition, then asks this trait for
/// the driver matching the definition's provider field. Tests swap in mock
/// driver sets.
pub trait DriverSet: Send + Sync {
    /// The text driver for `provider`.
    fn text_driver(&self, provider: ProviderId) -> &dyn TextDriver;

    /// The image driver for `provider`.
    fn image_driver(&self, provider: ProviderId) -> &dyn ImageDriver;
}
