//! Structured extraction error types.

/// Kinds of structured extraction errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// The model output could not be parsed as JSON after cleaning.
    ///
    /// Carries the cleaned text for diagnostics. Extraction is never retried
    /// automatically; the caller decides whether to re-prompt.
    #[display("Invalid structured output: {}", message)]
    InvalidStructuredOutput {
        /// The JSON parse failure message
        message: String,
        /// The cleaned text that failed to parse
        cleaned: String,
    },
    /// The parsed document violates the canon shape invariants
    #[display("Canon schema violation: {}", _0)]
    SchemaViolation(String),
}

/// Structured extraction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The kind of error that occurred
    pub kind: ExtractionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new extraction error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
