//! Utilities for extracting the structured canon from LLM responses.
//!
//! Model output often arrives wrapped in markdown fences or preceded by
//! conversational preamble even when the prompt forbids both. The cleaning
//! here is deliberately mechanical: strip the fence, drop anything before
//! the first object brace, and hand the rest to the JSON parser. A parse
//! failure is a distinct, diagnosable error and is never retried at this
//! layer; the caller decides whether to re-prompt.

use fabula_core::CanonDocument;
use fabula_error::{ExtractionError, ExtractionErrorKind};

/// Strip incidental formatting from a raw model response.
///
/// 1. Trim surrounding whitespace.
/// 2. If the text opens with a fence marker, keep only the interior: from
///    the first newline after the opening marker to the last occurrence of
///    the closing marker.
/// 3. If a leading object brace is preceded by non-JSON preamble, discard
///    everything before the first `{`.
///
/// # Examples
///
/// ```
/// use fabula_studio::strip_json_fence;
///
/// assert_eq!(strip_json_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(strip_json_fence("noise {\"a\":1}"), "{\"a\":1}");
/// ```
pub fn strip_json_fence(raw: &str) -> String {
    let mut s = raw.trim();

    if s.starts_with("```") {
        let first_newline = s.find('\n');
        let last_fence = s.rfind("```");
        if let (Some(open), Some(close)) = (first_newline, last_fence) {
            if close > open {
                s = s[open + 1..close].trim();
            }
        }
    }

    match s.find('{') {
        Some(brace) if brace > 0 => s[brace..].to_string(),
        _ => s.to_string(),
    }
}

/// Parse a raw model response into a [`CanonDocument`].
///
/// # Errors
///
/// - `InvalidStructuredOutput` if the cleaned text is not valid JSON for
///   the canon shape; the cleaned text is carried for diagnostics.
/// - `SchemaViolation` if the parsed document breaks the list/detail-map id
///   correspondence invariant.
pub fn extract_canon_json(raw: &str) -> Result<CanonDocument, ExtractionError> {
    let cleaned = strip_json_fence(raw);

    let canon: CanonDocument = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!(
            error = %e,
            cleaned_length = cleaned.len(),
            "Canon extraction produced unparseable JSON"
        );
        ExtractionError::new(ExtractionErrorKind::InvalidStructuredOutput {
            message: e.to_string(),
            cleaned: cleaned.clone(),
        })
    })?;

    canon.validate().map_err(|violations| {
        tracing::error!(violations = %violations, "Canon failed shape validation");
        ExtractionError::new(ExtractionErrorKind::SchemaViolation(violations))
    })?;

    Ok(canon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let cleaned = strip_json_fence("```json\n{\"a\":1}\n```");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence() {
        let cleaned = strip_json_fence("```\n{\"a\": 1}\n```");
        assert_eq!(cleaned, "{\"a\": 1}");
    }

    #[test]
    fn drops_preamble_before_brace() {
        let cleaned = strip_json_fence("Sure! Here it is: {\"a\":1}");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn leaves_clean_json_untouched() {
        let cleaned = strip_json_fence("  {\"a\":1}  ");
        assert_eq!(cleaned, "{\"a\":1}");
    }

    #[test]
    fn extracts_fenced_canon() {
        let raw = "```json\n{\"plot\":{\"title\":\"Tide Road\"}}\n```";
        let canon = extract_canon_json(raw).unwrap();
        assert_eq!(canon.plot.title, "Tide Road");
    }

    #[test]
    fn extracts_canon_with_preamble() {
        let raw = "Here is your canon: {\"plot\":{\"title\":\"Tide Road\"}}";
        let canon = extract_canon_json(raw).unwrap();
        assert_eq!(canon.plot.title, "Tide Road");
    }

    #[test]
    fn rejects_non_json() {
        let err = extract_canon_json("not json at all").unwrap_err();
        match err.kind {
            ExtractionErrorKind::InvalidStructuredOutput { cleaned, .. } => {
                assert_eq!(cleaned, "not json at all");
            }
            other => panic!("unexpected kind: {other}"),
        }
    }

    #[test]
    fn rejects_id_map_mismatch() {
        let raw = r#"{
            "characters": {
                "list": [{"id": "ash", "name": "Ash", "occupation": "", "role": "", "bio": ""}],
                "byId": {}
            }
        }"#;
        let err = extract_canon_json(raw).unwrap_err();
        assert!(matches!(err.kind, ExtractionErrorKind::SchemaViolation(_)));
    }
}
