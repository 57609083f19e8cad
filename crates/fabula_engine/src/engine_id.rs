//! Logical engine identifiers.

use serde::{Deserialize, Serialize};

/// Logical id of a catalog engine.
///
/// These ids are stable and user-facing; the provider-native model names
/// they bind to live in the [`crate::EngineDefinition`].
///
/// # Examples
///
/// ```
/// use fabula_engine::EngineId;
/// use std::str::FromStr;
///
/// assert_eq!(EngineId::Gemini3Preview.as_str(), "gemini-3-preview");
/// assert_eq!(EngineId::from_str("openai-gpt-5.1").unwrap(), EngineId::OpenAiGpt51);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum EngineId {
    /// OpenAI GPT-5.1 (text) + gpt-image-1 (image)
    #[serde(rename = "openai-gpt-5.1")]
    #[strum(serialize = "openai-gpt-5.1")]
    OpenAiGpt51,
    /// OpenAI GPT-5 mini (text) + gpt-image-1 (image)
    #[serde(rename = "openai-gpt-5-mini")]
    #[strum(serialize = "openai-gpt-5-mini")]
    OpenAiGpt5Mini,
    /// Gemini 3 Pro Preview (text + image)
    #[serde(rename = "gemini-3-preview")]
    #[strum(serialize = "gemini-3-preview")]
    Gemini3Preview,
}

impl EngineId {
    /// Stable string form of the id.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineId::OpenAiGpt51 => "openai-gpt-5.1",
            EngineId::OpenAiGpt5Mini => "openai-gpt-5-mini",
            EngineId::Gemini3Preview => "gemini-3-preview",
        }
    }
}
