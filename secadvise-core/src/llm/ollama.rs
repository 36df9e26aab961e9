//! Ollama provider for local model execution
//!
//! Talks to a running Ollama daemon through ollama-rs. The daemon and the
//! configured model are checked once on `connect`; models are not pulled
//! automatically.

use super::errors::LLMError;
use super::traits::LLMProvider;
use super::types::*;
use crate::config::OllamaConfig;
use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::error::OllamaError;
use ollama_rs::generation::chat::{ChatMessage, request::ChatMessageRequest};
use ollama_rs::models::ModelOptions;
use reqwest::Url;
use tracing::{debug, info};

/// Ollama provider implementation
pub struct OllamaProvider {
    client: Ollama,
    model_name: String,
}

impl OllamaProvider {
    /// Create a provider without contacting the daemon
    pub fn new(config: &OllamaConfig) -> Result<Self, LLMError> {
        let url = Url::parse(&config.host)
            .map_err(|e| LLMError::config(format!("Invalid Ollama host '{}': {}", config.host, e)))?;
        if !matches!(url.scheme(), "http" | "https") || url.host().is_none() {
            return Err(LLMError::config(format!(
                "Invalid Ollama host '{}': expected an http(s) URL",
                config.host
            )));
        }

        let client = Ollama::builder().host(url).port(config.port).build();
        Ok(Self { client, model_name: config.model.clone() })
    }

    /// Create a provider and verify the daemon answers and has the model
    pub async fn connect(config: &OllamaConfig) -> Result<Self, LLMError> {
        let provider = Self::new(config)?;
        let models = provider.list_models().await.map_err(|e| {
            LLMError::network(format!(
                "Ollama server not running. Start it with: ollama serve\n{}",
                e
            ))
        })?;

        if !models.iter().any(|name| is_same_model(name, &provider.model_name)) {
            return Err(LLMError::model_not_found(&provider.model_name));
        }
        Ok(provider)
    }

    fn convert_message(msg: &Message) -> ChatMessage {
        match msg.role {
            Role::System => ChatMessage::system(msg.content.clone()),
            Role::User => ChatMessage::user(msg.content.clone()),
            Role::Assistant => ChatMessage::assistant(msg.content.clone()),
        }
    }

    fn convert_options(options: &CompletionOptions) -> ModelOptions {
        let mut model_options = ModelOptions::default();

        if let Some(temp) = options.temperature {
            model_options = model_options.temperature(temp);
        }

        if let Some(max_tokens) = options.max_tokens {
            model_options = model_options.num_predict(i32::try_from(max_tokens).unwrap_or(i32::MAX));
        }

        if let Some(context_length) = options.context_length {
            model_options = model_options.num_ctx(context_length as u64);
        }

        model_options
    }

    /// List locally available models
    pub async fn list_models(&self) -> Result<Vec<String>, LLMError> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| map_error(e, &self.model_name))?;

        Ok(models.into_iter().map(|m| m.name).collect())
    }
}

/// `llama3` names the same local model as `llama3:latest`
fn is_same_model(local: &str, requested: &str) -> bool {
    local == requested || local.strip_suffix(":latest") == Some(requested)
}

fn map_error(err: OllamaError, model: &str) -> LLMError {
    match err {
        OllamaError::ReqwestError(e) => LLMError::network(e.to_string()),
        OllamaError::JsonError(e) => LLMError::parse(e.to_string()),
        OllamaError::Other(body) if body.contains("not found") => LLMError::model_not_found(model),
        other => LLMError::provider("ollama", other.to_string()),
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model_name
    }

    async fn is_available(&self) -> bool {
        self.client.list_local_models().await.is_ok()
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError> {
        let chat_messages: Vec<ChatMessage> = messages.iter().map(Self::convert_message).collect();

        let request = ChatMessageRequest::new(self.model_name.clone(), chat_messages)
            .options(Self::convert_options(&options));

        debug!(model = %self.model_name, ?options, "Sending chat request to Ollama");
        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| map_error(e, &self.model_name))?;

        let usage = response.final_data.as_ref().map(|data| Usage {
            prompt_tokens: data.prompt_eval_count as usize,
            completion_tokens: data.eval_count as usize,
            total_tokens: (data.prompt_eval_count + data.eval_count) as usize,
        });

        info!(model = %self.model_name, "Ollama completion finished");

        Ok(CompletionResponse {
            model: self.model_name.clone(),
            content: response.message.content,
            usage,
        })
    }
}
