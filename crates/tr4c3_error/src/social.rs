//! Social platform errors.

use crate::{SigningError, SigningErrorKind};

/// Social platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SocialErrorKind {
    /// Platform answered with a non-success status
    #[display("Remote error {}: {}", status, body)]
    Remote {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Request never produced a response
    #[display("Transport error: {}", _0)]
    Transport(String),

    /// Success response body could not be decoded
    #[display("Decode error: {}", _0)]
    Decode(String),

    /// Content rejected before dispatch
    #[display("Validation failed: {}", _0)]
    Validation(String),

    /// Request could not be signed
    #[display("Signing failed: {}", _0)]
    Signing(SigningErrorKind),
}

impl SocialErrorKind {
    /// HTTP status of a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the platform rejected the request for exceeding its rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}

/// Social platform error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Social Error: {} at {}:{}", kind, file, line)]
pub struct SocialError {
    /// The specific error kind
    pub kind: SocialErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl SocialError {
    /// Create a new social error.
    #[track_caller]
    pub fn new(kind: SocialErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SocialErrorKind {
        &self.kind
    }
}

impl From<SigningError> for SocialError {
    #[track_caller]
    fn from(err: SigningError) -> Self {
        Self::new(SocialErrorKind::Signing(err.kind))
    }
}

/// Result type for social platform operations.
pub type SocialResult<T> = Result<T, SocialError>;
