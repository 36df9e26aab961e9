//! Chat-completion backends
//!
//! A single `LLMProvider` seam with OpenAI and Ollama implementations, the
//! versioned security prompts, and the fixed per-backend sampling profiles.

pub mod errors;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod profile;
pub mod prompts;
pub mod traits;
pub mod types;

use crate::config::SecadviseConfig;
use std::sync::Arc;

pub use errors::{LLMError, LLMResult};
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use profile::{Backend, GenerationProfile};
pub use traits::LLMProvider;
pub use types::{CompletionOptions, CompletionResponse, Message, Role, Usage};

/// Build the provider selected by `config.backend`.
///
/// Ollama is probed before returning so a missing daemon fails here rather
/// than on the first request.
pub async fn provider_from_config(config: &SecadviseConfig) -> LLMResult<Arc<dyn LLMProvider>> {
    match config.backend {
        Backend::OpenAI => Ok(Arc::new(OpenAIProvider::new(&config.openai)?)),
        Backend::Ollama => Ok(Arc::new(OllamaProvider::connect(&config.ollama).await?)),
    }
}
