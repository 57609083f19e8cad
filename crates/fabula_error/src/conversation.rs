//! Conversation context error types.

/// Kinds of conversation context errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConversationErrorKind {
    /// The stored log version changed between load and commit.
    ///
    /// A concurrent turn on the same (project, mode) pair committed first;
    /// this turn's append was not persisted.
    #[display("Concurrent turn detected on {} (loaded version {}, stored version {})", key, loaded, stored)]
    ConcurrentTurn {
        /// Record key of the conversation log
        key: String,
        /// Version the turn loaded
        loaded: u64,
        /// Version found at commit time
        stored: u64,
    },
}

/// Conversation context error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Conversation Error: {} at line {} in {}", kind, line, file)]
pub struct ConversationError {
    /// The kind of error that occurred
    pub kind: ConversationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConversationError {
    /// Create a new conversation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConversationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
