//! OpenAI Chat Completions provider built on async-openai

use super::errors::LLMError;
use super::traits::LLMProvider;
use super::types::*;
use crate::config::OpenAIConfig;
use async_openai::{
    Client,
    config::OpenAIConfig as ClientConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, info};

/// OpenAI provider
pub struct OpenAIProvider {
    client: Client<ClientConfig>,
    model: String,
}

impl OpenAIProvider {
    /// Create a provider; fails when no API key is configured
    pub fn new(config: &OpenAIConfig) -> Result<Self, LLMError> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(&config.api_key_env).map_err(|_| {
                LLMError::auth(format!("OpenAI API key not found in {}", config.api_key_env))
            })?,
        };

        if api_key.trim().is_empty() {
            return Err(LLMError::auth("OpenAI API key is empty"));
        }

        let mut client_config = ClientConfig::new().with_api_key(api_key);
        if let Some(base_url) = &config.base_url {
            Url::parse(base_url).map_err(|e| {
                LLMError::config(format!("Invalid OpenAI base_url '{}': {}", base_url, e))
            })?;
            client_config = client_config.with_api_base(base_url);
        }

        Ok(Self { client: Client::with_config(client_config), model: config.model.clone() })
    }

    fn convert_messages(
        &self,
        messages: Vec<Message>,
    ) -> Result<Vec<ChatCompletionRequestMessage>, LLMError> {
        messages
            .into_iter()
            .map(|msg| {
                let converted: ChatCompletionRequestMessage = match msg.role {
                    Role::System => ChatCompletionRequestSystemMessageArgs::default()
                        .content(msg.content)
                        .build()
                        .map_err(|e| map_error(e, &self.model))?
                        .into(),
                    Role::User => ChatCompletionRequestUserMessageArgs::default()
                        .content(msg.content)
                        .build()
                        .map_err(|e| map_error(e, &self.model))?
                        .into(),
                    Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                        .content(msg.content)
                        .build()
                        .map_err(|e| map_error(e, &self.model))?
                        .into(),
                };
                Ok(converted)
            })
            .collect()
    }
}

fn map_error(err: OpenAIError, model: &str) -> LLMError {
    match err {
        OpenAIError::Reqwest(e) => LLMError::network(e.to_string()),
        OpenAIError::ApiError(api) => match api.code.as_deref() {
            Some("model_not_found") => LLMError::model_not_found(model),
            Some("invalid_api_key") => LLMError::auth(api.message),
            Some("rate_limit_exceeded" | "insufficient_quota") => LLMError::api(429, api.message),
            _ => LLMError::provider("openai", api.message),
        },
        OpenAIError::JSONDeserialize(e) => LLMError::parse(e.to_string()),
        OpenAIError::InvalidArgument(message) => LLMError::invalid_request(message),
        other => LLMError::provider("openai", other.to_string()),
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.client.models().list().await.is_ok()
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, LLMError> {
        let openai_messages = self.convert_messages(messages)?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages(openai_messages);
        if let Some(temperature) = options.temperature {
            builder.temperature(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            builder.max_completion_tokens(u32::try_from(max_tokens).unwrap_or(u32::MAX));
        }
        let request = builder.build().map_err(|e| map_error(e, &self.model))?;

        debug!(model = %self.model, ?options, "Sending chat completion to OpenAI");
        let response =
            self.client.chat().create(request).await.map_err(|e| map_error(e, &self.model))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens as usize,
            completion_tokens: u.completion_tokens as usize,
            total_tokens: u.total_tokens as usize,
        });

        info!(
            model = %response.model,
            total_tokens = usage.map(|u| u.total_tokens).unwrap_or(0),
            "OpenAI completion finished"
        );

        Ok(CompletionResponse { model: response.model, content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key() {
        let config = OpenAIConfig { api_key: Some("sk-test".to_string()), ..OpenAIConfig::default() };
        let provider = OpenAIProvider::new(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = OpenAIConfig {
            api_key: Some("sk-test".to_string()),
            base_url: Some("not a url".to_string()),
            ..OpenAIConfig::default()
        };
        let result = OpenAIProvider::new(&config);
        assert!(matches!(result, Err(LLMError::ConfigurationError { .. })));
    }

    fn api_error(code: Option<&str>, message: &str) -> OpenAIError {
        OpenAIError::ApiError(async_openai::error::ApiError {
            message: message.to_string(),
            r#type: None,
            param: None,
            code: code.map(str::to_string),
        })
    }

    #[test]
    fn test_api_error_mapping() {
        let err = map_error(api_error(Some("model_not_found"), "no such model"), "gpt-9");
        assert!(matches!(err, LLMError::ModelNotFound { ref model } if model == "gpt-9"));

        let err = map_error(api_error(Some("insufficient_quota"), "quota exceeded"), "gpt-4o-mini");
        assert!(matches!(err, LLMError::ApiError { status: 429, .. }));

        let err = map_error(api_error(Some("invalid_api_key"), "bad key"), "gpt-4o-mini");
        assert!(matches!(err, LLMError::AuthenticationError { .. }));

        let err = map_error(api_error(None, "server error"), "gpt-4o-mini");
        assert!(matches!(err, LLMError::ProviderError { .. }));
    }

    #[test]
    fn test_missing_key() {
        let config = OpenAIConfig {
            api_key_env: "SECADVISE_TEST_UNSET_OPENAI_KEY".to_string(),
            ..OpenAIConfig::default()
        };
        let result = OpenAIProvider::new(&config);
        assert!(matches!(result, Err(LLMError::AuthenticationError { .. })));
    }

    #[test]
    fn test_empty_key() {
        let config = OpenAIConfig { api_key: Some("  ".to_string()), ..OpenAIConfig::default() };
        assert!(OpenAIProvider::new(&config).is_err());
    }

    #[test]
    fn test_message_conversion() {
        let config = OpenAIConfig { api_key: Some("sk-test".to_string()), ..OpenAIConfig::default() };
        let provider = OpenAIProvider::new(&config).unwrap();
        let converted = provider
            .convert_messages(vec![Message::system("s"), Message::user("u"), Message::assistant("a")])
            .unwrap();
        assert_eq!(converted.len(), 3);
        assert!(matches!(converted[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(converted[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(converted[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    #[tokio::test]
    #[ignore] // Requires OPENAI_API_KEY and network access
    async fn test_live_completion() {
        let provider = OpenAIProvider::new(&OpenAIConfig::default()).unwrap();
        let response = provider
            .complete(vec![Message::user("Say OK")], CompletionOptions::with_temperature(0.0).max_tokens(5))
            .await
            .unwrap();
        assert!(!response.content.is_empty());
    }
}
