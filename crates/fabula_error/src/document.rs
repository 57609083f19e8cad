//! Document extraction error types.

/// Kinds of document extraction errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DocumentErrorKind {
    /// The file extension is not recognized by any configured extractor
    #[display("Unsupported file format: {}", _0)]
    UnsupportedFormat(String),
    /// Extraction succeeded but produced empty or whitespace-only text
    #[display("Extracted document contained no text")]
    EmptyContent,
    /// The extractor backend failed
    #[display("Document extraction failed: {}", _0)]
    ExtractionFailed(String),
}

/// Document extraction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Document Error: {} at line {} in {}", kind, line, file)]
pub struct DocumentError {
    /// The kind of error that occurred
    pub kind: DocumentErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DocumentError {
    /// Create a new document error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DocumentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
