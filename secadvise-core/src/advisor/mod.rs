//! Security advice clients
//!
//! `SecurityAdvisor` answers security questions directly; `SecurityRagClient`
//! grounds answers in documents pulled from the knowledge base.

pub mod rag;

use crate::llm::prompts::{
    PromptTemplates, SECURITY_EXPERT_PROMPT, SENSITIVE_DATA_PROMPT,
};
use crate::llm::{CompletionOptions, GenerationProfile, LLMProvider, LLMResult, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub use rag::{RagResponse, SecurityRagClient, NEUTRAL_RELEVANCE};

/// Model assessment of a text scanned for sensitive data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveDataReport {
    /// Free-form model assessment
    pub analysis: String,
    /// The scanned text
    pub text: String,
}

/// Security-focused question answering over any chat backend
#[derive(Clone)]
pub struct SecurityAdvisor {
    provider: Arc<dyn LLMProvider>,
    profile: GenerationProfile,
}

impl SecurityAdvisor {
    pub fn new(provider: Arc<dyn LLMProvider>, profile: GenerationProfile) -> Self {
        Self { provider, profile }
    }

    pub fn provider(&self) -> &dyn LLMProvider {
        self.provider.as_ref()
    }

    /// Advice under a caller-chosen system prompt, e.g. a specific prompt version
    pub async fn get_security_advice(&self, query: &str, system_prompt: Option<&str>) -> LLMResult<String> {
        let system = system_prompt.unwrap_or(SECURITY_EXPERT_PROMPT);
        self.chat(system, query.to_string(), self.profile.advice).await
    }

    /// Advice under the default expert prompt, optionally grounded in `context`
    pub async fn generate_security_response(&self, query: &str, context: Option<&str>) -> LLMResult<String> {
        let user = PromptTemplates::contextual_question(query, context);
        self.chat(SECURITY_EXPERT_PROMPT, user, self.profile.advice).await
    }

    /// Ask the model to flag keys, passwords, tokens and personal data in `text`
    pub async fn check_sensitive_data_exposure(&self, text: &str) -> LLMResult<SensitiveDataReport> {
        let analysis =
            self.chat(SENSITIVE_DATA_PROMPT, text.to_string(), self.profile.sensitive_scan).await?;
        Ok(SensitiveDataReport { analysis, text: text.to_string() })
    }

    /// Audit `advice` against best practices for `category`
    pub async fn validate_security_advice(&self, advice: &str, category: &str) -> LLMResult<String> {
        let system = PromptTemplates::auditor_prompt(category);
        self.chat(&system, advice.to_string(), self.profile.validation).await
    }

    async fn chat(&self, system: &str, user: String, options: CompletionOptions) -> LLMResult<String> {
        let messages = vec![Message::system(system), Message::user(user)];
        let response = self.provider.complete(messages, options).await?;
        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            chars = response.content.len(),
            "Generated security response"
        );
        Ok(response.content)
    }
}
