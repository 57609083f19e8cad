//! OpenAI API client.

use crate::ClientConfig;
use crate::openai::dto::{
    ChatCompletionRequest, ChatCompletionResponse, ImageGenerationRequest,
    ImageGenerationResponse, WireMessage,
};
use async_trait::async_trait;
use base64::Engine as _;
use fabula_core::{ChatMessage, GeneratedImage, ImageSize, Role};
use fabula_error::{ModelsError, ModelsErrorKind, ModelsResult};
use fabula_interface::{ImageDriver, TextDriver};
use tracing::{debug, error, instrument};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_IMAGE_URL: &str = "https://api.openai.com/v1/images/generations";
const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI chat and image adapter.
///
/// The credential is read from `OPENAI_API_KEY` at construction but only
/// checked at call time, so a process without the variable can still serve
/// requests routed to other providers.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    chat_url: String,
    image_url: String,
}

impl OpenAiClient {
    /// Create a client reading the credential from the environment.
    pub fn from_env(config: &ClientConfig) -> ModelsResult<Self> {
        let api_key = std::env::var(OPENAI_KEY_VAR).ok();
        Self::build(api_key, config)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &ClientConfig) -> ModelsResult<Self> {
        Self::build(Some(api_key.into()), config)
    }

    fn build(api_key: Option<String>, config: &ClientConfig) -> ModelsResult<Self> {
        debug!("Creating new OpenAI client");
        Ok(Self {
            client: config.build_http_client()?,
            api_key,
            chat_url: OPENAI_CHAT_URL.to_string(),
            image_url: OPENAI_IMAGE_URL.to_string(),
        })
    }

    /// Override the endpoint base URLs (local gateways, test servers).
    pub fn with_endpoints(
        mut self,
        chat_url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        self.chat_url = chat_url.into();
        self.image_url = image_url.into();
        self
    }

    fn require_key(&self) -> ModelsResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::AuthMissing {
                provider: "openai",
                env_var: OPENAI_KEY_VAR,
            })
        })
    }

    fn convert_messages(messages: &[ChatMessage]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect()
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> ModelsResult<String> {
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                ModelsError::new(ModelsErrorKind::Transport(format!("request failed: {}", e)))
            })?;

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(status = %status, body = %raw, "OpenAI API returned error");
            return Err(ModelsError::new(ModelsErrorKind::ProviderRejected {
                status: status.as_u16(),
                detail: raw,
            }));
        }

        Ok(raw)
    }
}

#[async_trait]
impl TextDriver for OpenAiClient {
    #[instrument(skip_all, fields(model = %model, message_count = messages.len()))]
    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> ModelsResult<String> {
        let api_key = self.require_key()?;

        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: Self::convert_messages(messages),
        };

        debug!("Sending chat request to OpenAI API");
        let raw = self.post_json(&self.chat_url, api_key, &request).await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&raw).map_err(|e| {
            error!(error = %e, "Failed to parse OpenAI chat response");
            ModelsError::new(ModelsErrorKind::MalformedResponse(format!(
                "chat response was not valid JSON: {}",
                e
            )))
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                error!("OpenAI chat response missing message content");
                ModelsError::new(ModelsErrorKind::MalformedResponse(
                    "chat response missing choices[0].message.content".to_string(),
                ))
            })?;

        if content.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::EmptyReply));
        }

        Ok(content)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[async_trait]
impl ImageDriver for OpenAiClient {
    #[instrument(skip_all, fields(model = %model, size = %size))]
    async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        size: ImageSize,
    ) -> ModelsResult<GeneratedImage> {
        let api_key = self.require_key()?;

        let request = ImageGenerationRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            n: 1,
            size: size.wire_format(),
        };

        debug!("Sending image request to OpenAI API");
        let raw = self.post_json(&self.image_url, api_key, &request).await?;

        let parsed: ImageGenerationResponse = serde_json::from_str(&raw).map_err(|e| {
            error!(error = %e, "Failed to parse OpenAI image response");
            ModelsError::new(ModelsErrorKind::MalformedResponse(format!(
                "image response was not valid JSON: {}",
                e
            )))
        })?;

        let b64 = parsed
            .data
            .first()
            .and_then(|d| d.b64_json.clone())
            .ok_or_else(|| {
                error!("OpenAI image response missing b64_json");
                ModelsError::new(ModelsErrorKind::NoImageData)
            })?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(&b64)
            .map_err(|e| {
                error!(error = %e, "OpenAI image payload was not valid base64");
                ModelsError::new(ModelsErrorKind::NoImageData)
            })?;

        Ok(GeneratedImage::new(data, "image/png".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
