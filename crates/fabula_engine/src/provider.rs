//! Backend provider identities.

use serde::{Deserialize, Serialize};

/// The backend providers an engine can route to.
///
/// Adapter dispatch is by this explicit tag, never by sniffing model-name
/// strings.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat/image APIs
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Google Gemini generateContent API
    Gemini,
}

impl ProviderId {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Gemini => "gemini",
        }
    }
}
