//! Wire types for the Gemini `generateContent` API.

use serde::{Deserialize, Serialize};

/// A single part of a content entry. Exactly one field is set per part.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WirePart {
    pub text: String,
}

/// One entry of the request `contents` array.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireContent {
    pub role: &'static str,
    pub parts: Vec<WirePart>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
}

/// Inline binary payload in a response part.
///
/// The API has emitted both `inlineData` and `inline_data` spellings; both
/// are accepted.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InlineData {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

/// Response body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// All text parts of the first candidate, concatenated.
    pub fn joined_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// The first inline payload of the first candidate, if any.
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.inline_data.as_ref())
                    .find(|inline| inline.data.is_some())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.joined_text(), "Hello world");
    }

    #[test]
    fn accepts_both_inline_data_spellings() {
        let camel = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"QUJD","mimeType":"image/webp"}}]}}]}"#;
        let snake = r#"{"candidates":[{"content":{"parts":[{"inline_data":{"data":"QUJD","mime_type":"image/webp"}}]}}]}"#;
        for body in [camel, snake] {
            let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
            let inline = parsed.first_inline_data().unwrap();
            assert_eq!(inline.data.as_deref(), Some("QUJD"));
            assert_eq!(inline.mime_type.as_deref(), Some("image/webp"));
        }
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let parsed: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.joined_text(), "");
        assert!(parsed.first_inline_data().is_none());
    }
}
