//! Wire types for the OpenAI chat completions and image generation APIs.

use serde::{Deserialize, Serialize};

/// A single message in the chat completions wire format.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

/// Request body for `/v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

/// Response body for `/v1/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Request body for `/v1/images/generations`.
///
/// `response_format` is deliberately absent: the endpoint rejects it for
/// this model family.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageDatum {
    #[serde(default)]
    pub b64_json: Option<String>,
}

/// Response body for `/v1/images/generations`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageGenerationResponse {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}
