//! Top-level error wrapper types.

use crate::{ConfigError, GenerationError, ServerError, SigningError, SocialError};

/// Every error a bot operation can surface.
///
/// # Examples
///
/// ```
/// use tr4c3_error::{ConfigError, Tr4c3Error};
///
/// let err: Tr4c3Error = ConfigError::new("TWITTER_API_KEY not set").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum Tr4c3ErrorKind {
    /// Missing or invalid configuration
    #[from(ConfigError)]
    Config(ConfigError),
    /// Request signature could not be computed
    #[from(SigningError)]
    Signing(SigningError),
    /// Social platform call failed
    #[from(SocialError)]
    Social(SocialError),
    /// Content generation failed
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Manual trigger server failed
    #[from(ServerError)]
    Server(ServerError),
}

/// TR4C3 error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("TR4C3 Error: {}", _0)]
pub struct Tr4c3Error(Box<Tr4c3ErrorKind>);

impl Tr4c3Error {
    /// Create a new error from a kind.
    pub fn new(kind: Tr4c3ErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &Tr4c3ErrorKind {
        &self.0
    }
}

impl<T> From<T> for Tr4c3Error
where
    T: Into<Tr4c3ErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for TR4C3 operations.
pub type Tr4c3Result<T> = std::result::Result<T, Tr4c3Error>;
