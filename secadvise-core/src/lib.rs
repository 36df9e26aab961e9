//! Core functionality for secadvise
//!
//! Keyword-scored retrieval over a small security knowledge base, versioned
//! security prompts, and advice / RAG / judge clients over OpenAI or a local
//! Ollama daemon.

pub mod advisor;
pub mod config;
pub mod eval;
pub mod knowledge;
pub mod llm;

use std::sync::Arc;

pub use advisor::{RagResponse, SecurityAdvisor, SecurityRagClient, SensitiveDataReport};
pub use config::SecadviseConfig;
pub use knowledge::{ContextRetriever, Document, KnowledgeBase, ScoringRule};

/// Retriever configured from the `[retrieval]` section
pub fn retriever_from_config(config: &SecadviseConfig) -> anyhow::Result<ContextRetriever> {
    let knowledge = Arc::new(config.knowledge_base()?);
    Ok(ContextRetriever::new(knowledge).with_rule(config.retrieval.scoring))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriever_from_default_config() {
        let retriever = retriever_from_config(&SecadviseConfig::default()).unwrap();
        assert_eq!(retriever.rule(), ScoringRule::Weighted);
        assert_eq!(retriever.knowledge().len(), 5);
    }

    #[test]
    fn test_retriever_from_simple_config() {
        let mut config = SecadviseConfig::default();
        config.retrieval.scoring = ScoringRule::Simple;
        let retriever = retriever_from_config(&config).unwrap();
        assert_eq!(retriever.rule(), ScoringRule::Simple);
    }
}
