//! Request signing errors.

/// Specific signing failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SigningErrorKind {
    /// A parameter, URL or query string could not be percent-encoded or decoded
    #[display("Encoding error: {}", _0)]
    Encoding(String),

    /// The keyed-hash primitive rejected its input
    #[display("Crypto error: {}", _0)]
    Crypto(String),
}

/// Signing error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Signing Error: {} at {}:{}", kind, file, line)]
pub struct SigningError {
    /// The specific error kind
    pub kind: SigningErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl SigningError {
    /// Create a new signing error.
    #[track_caller]
    pub fn new(kind: SigningErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`SigningErrorKind::Encoding`] error.
    #[track_caller]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(SigningErrorKind::Encoding(message.into()))
    }

    /// Shorthand for a [`SigningErrorKind::Crypto`] error.
    #[track_caller]
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::new(SigningErrorKind::Crypto(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SigningErrorKind {
        &self.kind
    }
}

/// Result type for signing operations.
pub type SigningResult<T> = Result<T, SigningError>;
