//! Error types for the TR4C3 bot.
//!
//! This crate provides the error types shared by every crate in the workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tr4c3_error::{ConfigError, Tr4c3Result};
//!
//! fn load() -> Tr4c3Result<String> {
//!     Err(ConfigError::new("OPENAI_API_KEY not set"))?
//! }
//!
//! match load() {
//!     Ok(value) => println!("Got: {}", value),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod server;
mod signing;
mod social;

pub use config::ConfigError;
pub use error::{Tr4c3Error, Tr4c3ErrorKind, Tr4c3Result};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult};
pub use server::{ServerError, ServerErrorKind};
pub use signing::{SigningError, SigningErrorKind, SigningResult};
pub use social::{SocialError, SocialErrorKind, SocialResult};
