//! Orchestrator error types.

/// Kinds of orchestrator errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StudioErrorKind {
    /// No engine configuration stored for the project
    #[display("No engine configuration found for project {}", _0)]
    EngineConfigNotFound(String),
    /// No canon document stored for the project
    #[display("No canon found for project {}", _0)]
    CanonNotFound(String),
    /// The caller supplied no new messages for a chat turn
    #[display("Chat turn requires at least one new message")]
    EmptyTurn,
    /// The rasterization collaborator produced no usable page image
    #[display("Page rasterization yielded no image: {}", _0)]
    RasterizationFailed(String),
}

/// Orchestrator error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Studio Error: {} at line {} in {}", kind, line, file)]
pub struct StudioError {
    /// The kind of error that occurred
    pub kind: StudioErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StudioError {
    /// Create a new studio error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StudioErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
