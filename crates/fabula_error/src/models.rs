//! Provider adapter error types.

/// Provider adapter error conditions, shared by the text and image adapters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelsErrorKind {
    /// No credential configured for the provider
    #[display("No API credential configured for provider {} (set {})", provider, env_var)]
    AuthMissing {
        /// Provider name ("openai", "gemini")
        provider: &'static str,
        /// Environment variable(s) the adapter looked for
        env_var: &'static str,
    },
    /// Network-level failure before an HTTP status was received
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The provider returned a non-success HTTP status
    #[display("Provider rejected request with status {}: {}", status, detail)]
    ProviderRejected {
        /// HTTP status code
        status: u16,
        /// Response body or error detail, possibly truncated
        detail: String,
    },
    /// The success response body could not be parsed into a reply
    #[display("Malformed provider response: {}", _0)]
    MalformedResponse(String),
    /// The success response contained no reply text
    #[display("Provider returned an empty reply")]
    EmptyReply,
    /// The success response contained no decodable image payload
    #[display("Provider returned no image data")]
    NoImageData,
}

/// Provider adapter error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for provider adapter operations.
pub type ModelsResult<T> = Result<T, ModelsError>;
