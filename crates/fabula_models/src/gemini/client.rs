//! Google Gemini API client.

use crate::ClientConfig;
use crate::gemini::dto::{
    GenerateContentRequest, GenerateContentResponse, WireContent, WirePart,
};
use async_trait::async_trait;
use base64::Engine as _;
use fabula_core::{ChatMessage, GeneratedImage, ImageSize, Role};
use fabula_error::{ModelsError, ModelsErrorKind, ModelsResult};
use fabula_interface::{ImageDriver, TextDriver};
use tracing::{debug, error, instrument};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_KEY_VARS: &str = "GOOGLE_API_KEY or GEMINI_API_KEY";

/// Gemini chat and image adapter.
///
/// Both capabilities go through the same `generateContent` endpoint; chat
/// reads text parts, image generation reads the inline payload. The size
/// hint is not part of the Gemini wire format and is ignored here.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiClient {
    /// Create a client reading the credential from the environment
    /// (`GOOGLE_API_KEY`, falling back to `GEMINI_API_KEY`).
    pub fn from_env(config: &ClientConfig) -> ModelsResult<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok();
        Self::build(api_key, config)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, config: &ClientConfig) -> ModelsResult<Self> {
        Self::build(Some(api_key.into()), config)
    }

    fn build(api_key: Option<String>, config: &ClientConfig) -> ModelsResult<Self> {
        debug!("Creating new Gemini client");
        Ok(Self {
            client: config.build_http_client()?,
            api_key,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base URL (local gateways, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn require_key(&self) -> ModelsResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::AuthMissing {
                provider: "gemini",
                env_var: GEMINI_KEY_VARS,
            })
        })
    }

    /// Translate canonical messages to the Gemini role vocabulary.
    ///
    /// Gemini knows only `user` and `model`; the internal `assistant` role
    /// becomes `model` and system instructions ride along as `user` turns.
    fn convert_messages(messages: &[ChatMessage]) -> Vec<WireContent> {
        messages
            .iter()
            .map(|m| WireContent {
                role: match m.role {
                    Role::Assistant => "model",
                    Role::System | Role::User => "user",
                },
                parts: vec![WirePart {
                    text: m.content.clone(),
                }],
            })
            .collect()
    }

    async fn generate_content(
        &self,
        model: &str,
        contents: Vec<WireContent>,
    ) -> ModelsResult<GenerateContentResponse> {
        let api_key = self.require_key()?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        );

        let request = GenerateContentRequest { contents };

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                ModelsError::new(ModelsErrorKind::Transport(format!("request failed: {}", e)))
            })?;

        let status = response.status();
        let raw = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(status = %status, body = %raw, "Gemini API returned error");
            return Err(ModelsError::new(ModelsErrorKind::ProviderRejected {
                status: status.as_u16(),
                detail: raw,
            }));
        }

        serde_json::from_str(&raw).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            ModelsError::new(ModelsErrorKind::MalformedResponse(format!(
                "generateContent response was not valid JSON: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl TextDriver for GeminiClient {
    #[instrument(skip_all, fields(model = %model, message_count = messages.len()))]
    async fn send_chat(&self, model: &str, messages: &[ChatMessage]) -> ModelsResult<String> {
        debug!("Sending chat request to Gemini API");
        let contents = Self::convert_messages(messages);
        let parsed = self.generate_content(model, contents).await?;

        let text = parsed.joined_text();
        if text.is_empty() {
            error!("Gemini chat response contained no text parts");
            return Err(ModelsError::new(ModelsErrorKind::EmptyReply));
        }

        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[async_trait]
impl ImageDriver for GeminiClient {
    #[instrument(skip_all, fields(model = %model, size = %size))]
    async fn generate_image(
        &self,
        model: &str,
        prompt: &str,
        size: ImageSize,
    ) -> ModelsResult<GeneratedImage> {
        debug!("Sending image request to Gemini API");
        let contents = vec![WireContent {
            role: "user",
            parts: vec![WirePart {
                text: prompt.to_string(),
            }],
        }];
        let parsed = self.generate_content(model, contents).await?;

        let inline = parsed.first_inline_data().ok_or_else(|| {
            error!("Gemini image response carried no inline data part");
            ModelsError::new(ModelsErrorKind::NoImageData)
        })?;

        let b64 = inline
            .data
            .as_deref()
            .ok_or_else(|| ModelsError::new(ModelsErrorKind::NoImageData))?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| {
                error!(error = %e, "Gemini image payload was not valid base64");
                ModelsError::new(ModelsErrorKind::NoImageData)
            })?;

        let mime_type = inline
            .mime_type
            .clone()
            .unwrap_or_else(|| "image/png".to_string());

        Ok(GeneratedImage::new(data, mime_type))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assistant_role_becomes_model_on_the_wire() {
        let messages = vec![
            ChatMessage::system("canon"),
            ChatMessage::user("who?"),
            ChatMessage::assistant("her"),
        ];
        let wire = GeminiClient::convert_messages(&messages);
        let roles: Vec<&str> = wire.iter().map(|c| c.role).collect();
        assert_eq!(roles, vec!["user", "user", "model"]);
        assert_eq!(wire[2].parts[0].text, "her");
    }

    #[test]
    fn missing_key_surfaces_auth_missing() {
        let client = GeminiClient::build(None, &ClientConfig::default()).unwrap();
        let err = client.require_key().unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::AuthMissing { provider: "gemini", .. }));
    }
}
