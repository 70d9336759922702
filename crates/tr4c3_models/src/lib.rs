//! Content generation for TR4C3.
//!
//! Text comes from an OpenAI-compatible chat completion endpoint behind the
//! [`CompletionDriver`] trait. [`ContentGenerator`] wraps a driver with the
//! persona prompts, quote cleanup and length policy.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tr4c3_models::{ContentGenerator, GenerationSettings, OpenAiClient, PromptContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = GenerationSettings::default();
//! let driver = OpenAiClient::new("sk-...", settings.model().clone());
//! let generator = ContentGenerator::new(Arc::new(driver), settings);
//!
//! let content = generator.generate(PromptContext::Post).await?;
//! println!("{} ({} chars)", content.text(), content.length());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod generator;
mod openai;
pub mod persona;
mod request;
mod response;

pub use driver::CompletionDriver;
pub use generator::{
    ContentGenerator, GeneratedContent, GenerationSettings, GenerationSettingsBuilder,
    LengthPolicy, PromptContext, strip_wrapping_quotes,
};
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiClient};
pub use request::{ChatCompletionRequest, ChatMessage};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
