//! Plain-text document extractor.

use async_trait::async_trait;
use fabula_core::FileKind;
use fabula_error::{DocumentError, DocumentErrorKind};
use fabula_interface::{DocumentExtractor, ExtractedScript};

/// Extractor for plain-text uploads.
///
/// Handles `.txt` files locally. PDF and DOCX extraction run in external
/// extractor services plugged in behind the same [`DocumentExtractor`]
/// trait; this implementation reports them as unsupported so a deployment
/// without those services fails loudly rather than silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract(
        &self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<ExtractedScript, DocumentError> {
        let lower = filename.to_lowercase();

        if lower.ends_with(".txt") {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            if text.is_empty() {
                return Err(DocumentError::new(DocumentErrorKind::EmptyContent));
            }
            return Ok(ExtractedScript {
                text,
                file_kind: FileKind::Txt,
            });
        }

        if lower.ends_with(".doc") {
            return Err(DocumentError::new(DocumentErrorKind::UnsupportedFormat(
                "legacy .doc is not supported; save the script as .docx, .pdf, or .txt"
                    .to_string(),
            )));
        }

        Err(DocumentError::new(DocumentErrorKind::UnsupportedFormat(
            filename.to_string(),
        )))
    }
}
