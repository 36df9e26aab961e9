//! Error types for LLM operations
//!
//! Transport and authentication failures are surfaced to the caller as-is;
//! nothing in this crate retries them.

use thiserror::Error;

/// Main error type for LLM operations
#[derive(Debug, Error)]
pub enum LLMError {
    /// API key is missing or invalid
    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    /// Network error occurred
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Invalid request parameters
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Model not found or not available
    #[error("Model '{model}' not found or not available")]
    ModelNotFound { model: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// Parsing or serialization error
    #[error("Parsing error: {message}")]
    ParseError { message: String },

    /// Provider-specific error
    #[error("Provider error ({provider}): {message}")]
    ProviderError { provider: String, message: String },
}

impl LLMError {
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthenticationError { message: message.into() }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError { status, message: message.into() }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest { message: message.into() }
    }

    pub fn model_not_found(model: impl Into<String>) -> Self {
        Self::ModelNotFound { model: model.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError { message: message.into() }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderError { provider: provider.into(), message: message.into() }
    }
}

/// Result type for LLM operations
pub type LLMResult<T> = Result<T, LLMError>;

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError { message: err.to_string() }
    }
}
