//! Engine registry error types.

/// Kinds of engine resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EngineErrorKind {
    /// The requested engine id is not in the catalog
    #[display("Unknown engine id: {}", _0)]
    UnknownEngine(String),
    /// The resolved engine does not support the requested capability
    #[display("Engine {} has no {} model configured", engine, capability)]
    CapabilityNotConfigured {
        /// Logical engine id that was resolved
        engine: String,
        /// Capability that was requested ("text" or "image")
        capability: &'static str,
    },
}

/// Engine registry error with location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{EngineError, EngineErrorKind};
///
/// let err = EngineError::new(EngineErrorKind::UnknownEngine("bogus".to_string()));
/// assert!(format!("{}", err).contains("Unknown engine"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Engine Error: {} at line {} in {}", kind, line, file)]
pub struct EngineError {
    /// The kind of error that occurred
    pub kind: EngineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl EngineError {
    /// Create a new engine error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: EngineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
