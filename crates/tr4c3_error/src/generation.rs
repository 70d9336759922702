//! Content generation errors.

/// Completion endpoint and post-processing failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Request to the completion endpoint failed
    #[display("HTTP error: {}", _0)]
    Http(String),

    /// Completion endpoint answered with a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// Response body could not be decoded
    #[display("Malformed completion: {}", _0)]
    Malformed(String),

    /// Completion contained no usable text
    #[display("Completion returned no content")]
    EmptyCompletion,

    /// Generated text exceeds the platform limit under the reject policy
    #[display("Generated text is {} characters, limit is {}", length, limit)]
    TooLong {
        /// Character count of the generated text
        length: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at {}:{}", kind, file, line)]
pub struct GenerationError {
    /// The specific error kind
    pub kind: GenerationErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
