//! Top-level error wrapper types.

use crate::{
    ConfigError, ConversationError, DocumentError, EngineError, ExtractionError, HttpError,
    JsonError, ModelsError, StorageError, StudioError,
};

/// The foundation error enum aggregating every error domain in the workspace.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FabulaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FabulaErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Engine registry error
    #[from(EngineError)]
    Engine(EngineError),
    /// Provider adapter error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Structured extraction error
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Document extraction error
    #[from(DocumentError)]
    Document(DocumentError),
    /// Conversation context error
    #[from(ConversationError)]
    Conversation(ConversationError),
    /// Orchestrator error
    #[from(StudioError)]
    Studio(StudioError),
}

/// Fabula error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fabula_error::{FabulaResult, EngineError, EngineErrorKind};
///
/// fn might_fail() -> FabulaResult<()> {
///     Err(EngineError::new(EngineErrorKind::UnknownEngine("x".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fabula Error: {}", _0)]
pub struct FabulaError(Box<FabulaErrorKind>);

impl FabulaError {
    /// Create a new error from a kind.
    pub fn new(kind: FabulaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FabulaErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FabulaErrorKind
impl<T> From<T> for FabulaError
where
    T: Into<FabulaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fabula operations.
pub type FabulaResult<T> = std::result::Result<T, FabulaError>;
