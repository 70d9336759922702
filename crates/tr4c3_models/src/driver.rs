//! Completion driver trait.

use crate::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use tr4c3_error::GenerationResult;

/// Core trait implemented by chat completion backends.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Run a single chat completion.
    async fn complete(&self, request: &ChatCompletionRequest)
    -> GenerationResult<ChatCompletionResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used when a request does not name one.
    fn model_name(&self) -> &str;
}
