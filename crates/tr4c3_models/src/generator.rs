//! Persona-driven text generation on top of a [`CompletionDriver`].

use crate::persona::{PERSONA_PROMPT, POST_INSTRUCTION, reply_instruction};
use crate::{ChatCompletionRequest, ChatMessage, CompletionDriver};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tr4c3_error::{GenerationError, GenerationErrorKind, GenerationResult};
use tracing::{debug, info, instrument, warn};

/// What to do when generated text exceeds `max_length`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPolicy {
    /// Clamp to `max_length` characters and trim trailing whitespace.
    ///
    /// Characters are Unicode scalar values, so symbol-heavy text may still
    /// exceed a platform that weights some code points double.
    #[default]
    Truncate,
    /// Fail with [`GenerationErrorKind::TooLong`].
    Reject,
}

/// Tunables for the completion request and post-processing.
#[derive(Debug, Clone, PartialEq, Getters, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
#[serde(default)]
pub struct GenerationSettings {
    /// Model identifier sent with every request.
    #[builder(default = "\"gpt-4-turbo-preview\".to_string()")]
    model: String,
    /// Completion token cap.
    #[builder(default = "100")]
    max_tokens: u32,
    /// Sampling temperature.
    #[builder(default = "1.2")]
    temperature: f32,
    /// Character limit applied after cleanup.
    #[builder(default = "280")]
    max_length: usize,
    /// Over-length handling.
    #[builder(default)]
    length_policy: LengthPolicy,
    /// Replacement for the built-in persona prompt.
    #[builder(default)]
    persona_prompt: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo-preview".to_string(),
            max_tokens: 100,
            temperature: 1.2,
            max_length: 280,
            length_policy: LengthPolicy::Truncate,
            persona_prompt: None,
        }
    }
}

impl GenerationSettings {
    /// Creates a new builder for `GenerationSettings`.
    pub fn builder() -> GenerationSettingsBuilder {
        GenerationSettingsBuilder::default()
    }
}

/// What the generated text is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptContext {
    /// A standalone post.
    Post,
    /// A reply to someone else's post.
    Reply {
        /// Text of the post being answered.
        mention_text: String,
    },
}

/// Cleaned text ready to publish.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GeneratedContent {
    /// The text.
    text: String,
    /// Length in characters.
    length: usize,
}

impl GeneratedContent {
    fn new(text: String) -> Self {
        let length = text.chars().count();
        Self { text, length }
    }
}

/// Remove one wrapping quote from each end, if present.
///
/// Surrounding whitespace is trimmed before and after. Each end is handled
/// independently, so a lone leading quote is still removed.
///
/// # Examples
///
/// ```
/// use tr4c3_models::strip_wrapping_quotes;
///
/// assert_eq!(strip_wrapping_quotes("\"The chain remembers.\""), "The chain remembers.");
/// assert_eq!(strip_wrapping_quotes("'half"), "half");
/// assert_eq!(strip_wrapping_quotes("no quotes"), "no quotes");
/// ```
pub fn strip_wrapping_quotes(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed
        .strip_suffix(['"', '\''])
        .unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// Generates persona text through a completion driver.
#[derive(Clone)]
pub struct ContentGenerator {
    driver: Arc<dyn CompletionDriver>,
    settings: GenerationSettings,
}

impl std::fmt::Debug for ContentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGenerator")
            .field("provider", &self.driver.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ContentGenerator {
    /// Creates a generator.
    pub fn new(driver: Arc<dyn CompletionDriver>, settings: GenerationSettings) -> Self {
        Self { driver, settings }
    }

    /// Settings in use.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Build the completion request for `context`.
    pub fn build_request(&self, context: &PromptContext) -> ChatCompletionRequest {
        let persona = self
            .settings
            .persona_prompt
            .as_deref()
            .unwrap_or(PERSONA_PROMPT);
        let instruction = match context {
            PromptContext::Post => POST_INSTRUCTION.to_string(),
            PromptContext::Reply { mention_text } => reply_instruction(mention_text),
        };

        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage::system(persona), ChatMessage::user(instruction)],
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
        }
    }

    /// Generate text for a post or reply.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The completion call fails
    /// - The completion has no choices or only blank content
    /// - The text is over length and the policy is [`LengthPolicy::Reject`]
    #[instrument(skip(self, context), fields(provider = self.driver.provider_name(), reply = matches!(context, PromptContext::Reply { .. })))]
    pub async fn generate(&self, context: PromptContext) -> GenerationResult<GeneratedContent> {
        let request = self.build_request(&context);
        let response = self.driver.complete(&request).await?;

        let raw = response
            .first_content()
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyCompletion))?;

        let cleaned = strip_wrapping_quotes(raw);
        if cleaned.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyCompletion));
        }

        let content = self.apply_length_policy(cleaned)?;
        info!(length = content.length, "Generated content");
        Ok(content)
    }

    fn apply_length_policy(&self, text: String) -> GenerationResult<GeneratedContent> {
        let limit = self.settings.max_length;
        let length = text.chars().count();
        if length <= limit {
            return Ok(GeneratedContent::new(text));
        }

        match self.settings.length_policy {
            LengthPolicy::Reject => {
                warn!(length, limit, "Generated text over limit, rejecting");
                Err(GenerationError::new(GenerationErrorKind::TooLong { length, limit }))
            }
            LengthPolicy::Truncate => {
                debug!(length, limit, "Generated text over limit, truncating");
                let clamped: String = text.chars().take(limit).collect();
                Ok(GeneratedContent::new(clamped.trim_end().to_string()))
            }
        }
    }
}
