//! Retrieval-augmented answers over the security knowledge base

use crate::knowledge::{ContextRetriever, DEFAULT_TOP_K};
use crate::llm::prompts::{PromptTemplates, RAG_EXPERT_PROMPT, RELEVANCE_RATING_PROMPT};
use crate::llm::{GenerationProfile, LLMProvider, LLMResult, Message};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Relevance returned when the model's rating cannot be parsed
pub const NEUTRAL_RELEVANCE: f32 = 0.5;

/// Generated answer together with the context it was grounded in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagResponse {
    pub query: String,
    pub response: String,
    pub retrieval_context: Vec<String>,
}

/// Retrieve-then-generate client
#[derive(Clone)]
pub struct SecurityRagClient {
    provider: Arc<dyn LLMProvider>,
    retriever: ContextRetriever,
    profile: GenerationProfile,
    top_k: usize,
}

impl SecurityRagClient {
    pub fn new(provider: Arc<dyn LLMProvider>, retriever: ContextRetriever, profile: GenerationProfile) -> Self {
        Self { provider, retriever, profile, top_k: DEFAULT_TOP_K }
    }

    /// Number of documents retrieved when no context is supplied
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn retriever(&self) -> &ContextRetriever {
        &self.retriever
    }

    pub fn retrieve_context(&self, query: &str, top_k: usize) -> Vec<String> {
        self.retriever.retrieve(query, top_k)
    }

    /// Answer `query` from `retrieval_context`, retrieving it first when absent
    pub async fn generate_rag_response(
        &self,
        query: &str,
        retrieval_context: Option<Vec<String>>,
    ) -> LLMResult<RagResponse> {
        let retrieval_context =
            retrieval_context.unwrap_or_else(|| self.retrieve_context(query, self.top_k));
        debug!(snippets = retrieval_context.len(), "Built retrieval context");

        let messages = vec![
            Message::system(RAG_EXPERT_PROMPT),
            Message::user(PromptTemplates::rag_question(query, &retrieval_context)),
        ];
        let response = self.provider.complete(messages, self.profile.rag).await?;

        Ok(RagResponse {
            query: query.to_string(),
            response: response.content,
            retrieval_context,
        })
    }

    /// Model-rated relevance of `context` to `query`, in `[0, 1]`.
    ///
    /// Replies that are not a number fall back to [`NEUTRAL_RELEVANCE`];
    /// transport errors are returned.
    pub async fn evaluate_context_relevance(&self, query: &str, context: &str) -> LLMResult<f32> {
        let messages = vec![
            Message::system(RELEVANCE_RATING_PROMPT),
            Message::user(PromptTemplates::relevance_question(query, context)),
        ];
        let response = self.provider.complete(messages, self.profile.relevance).await?;
        Ok(parse_relevance(&response.content))
    }
}

/// Parse a relevance reply, clamping to `[0, 1]`.
///
/// Infinities clamp like any other out-of-range value; NaN is treated as
/// unparseable.
pub fn parse_relevance(reply: &str) -> f32 {
    match reply.trim().parse::<f32>() {
        Ok(score) if !score.is_nan() => score.clamp(0.0, 1.0),
        _ => {
            warn!(reply = %reply.trim(), "Unparseable relevance score, using neutral default");
            NEUTRAL_RELEVANCE
        }
    }
}
