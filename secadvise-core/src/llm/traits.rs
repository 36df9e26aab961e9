//! Traits for LLM provider implementations

use super::types::*;
use crate::llm::errors::LLMError;
use async_trait::async_trait;

/// Chat-completion capability: messages in, text out
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the name of this provider
    fn name(&self) -> &str;

    /// Get the model ID being used
    fn model(&self) -> &str;

    /// Check if the provider is reachable and configured
    async fn is_available(&self) -> bool;

    /// Complete a chat conversation
    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError>;
}
