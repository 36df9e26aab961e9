//! Common types for LLM providers
//!
//! Backend-neutral message, option and response shapes shared by the OpenAI
//! and Ollama providers.

use serde::{Deserialize, Serialize};

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Message role in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Sampling parameters for a completion request.
///
/// `None` leaves the backend default in place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CompletionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens (`max_tokens` / `num_predict`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Context window size; only honoured by local backends (`num_ctx`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<usize>,
}

impl CompletionOptions {
    pub fn with_temperature(temperature: f32) -> Self {
        Self { temperature: Some(temperature), ..Self::default() }
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn context_length(mut self, context_length: usize) -> Self {
        self.context_length = Some(context_length);
        self
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// A completion returned by a provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    pub model: String,
    /// Assistant text; empty when the backend returned no content
    pub content: String,
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self { model: model.into(), content: content.into(), usage: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, Role::System);
        assert_eq!(Message::user("u").role, Role::User);
        assert_eq!(Message::assistant("a").content, "a");
    }

    #[test]
    fn test_options_builder() {
        let options = CompletionOptions::with_temperature(0.3).max_tokens(800).context_length(2048);
        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(800));
        assert_eq!(options.context_length, Some(2048));
        assert_eq!(CompletionOptions::default().temperature, None);
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
