//! Fixed sampling parameters per task and backend

use super::types::CompletionOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chat-completion backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    OpenAI,
    Ollama,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::OpenAI => f.write_str("openai"),
            Backend::Ollama => f.write_str("ollama"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Backend::OpenAI),
            "ollama" => Ok(Backend::Ollama),
            other => Err(format!("unknown backend '{}', expected openai or ollama", other)),
        }
    }
}

/// Options for each task the clients send to a model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfile {
    /// One-shot advice and contextual answers
    pub advice: CompletionOptions,
    /// Answers grounded in retrieved context
    pub rag: CompletionOptions,
    pub sensitive_scan: CompletionOptions,
    pub validation: CompletionOptions,
    pub relevance: CompletionOptions,
    /// Evaluator generations; temperature 0 for repeatable grading
    pub judge: CompletionOptions,
}

impl GenerationProfile {
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::OpenAI => Self {
                advice: CompletionOptions::with_temperature(0.3).max_tokens(500),
                rag: CompletionOptions::with_temperature(0.3).max_tokens(500),
                sensitive_scan: CompletionOptions::with_temperature(0.1),
                validation: CompletionOptions::with_temperature(0.2),
                relevance: CompletionOptions::with_temperature(0.1).max_tokens(10),
                judge: CompletionOptions::with_temperature(0.0).max_tokens(1000),
            },
            // Local models get a larger answer budget with a bounded context window
            Backend::Ollama => Self {
                advice: CompletionOptions::with_temperature(0.3).max_tokens(800).context_length(2048),
                rag: CompletionOptions::with_temperature(0.3).max_tokens(500),
                sensitive_scan: CompletionOptions::with_temperature(0.1),
                validation: CompletionOptions::with_temperature(0.2),
                relevance: CompletionOptions::with_temperature(0.1),
                judge: CompletionOptions::with_temperature(0.0).max_tokens(1000),
            },
        }
    }
}

impl Default for GenerationProfile {
    fn default() -> Self {
        Self::for_backend(Backend::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("OpenAI".parse::<Backend>(), Ok(Backend::OpenAI));
        assert_eq!("ollama".parse::<Backend>(), Ok(Backend::Ollama));
        assert!("claude".parse::<Backend>().is_err());
        assert_eq!(Backend::Ollama.to_string(), "ollama");
    }

    #[test]
    fn test_openai_profile() {
        let profile = GenerationProfile::for_backend(Backend::OpenAI);
        assert_eq!(profile.advice.max_tokens, Some(500));
        assert_eq!(profile.advice.context_length, None);
        assert_eq!(profile.relevance.max_tokens, Some(10));
        assert_eq!(profile.judge.temperature, Some(0.0));
    }

    #[test]
    fn test_ollama_profile() {
        let profile = GenerationProfile::for_backend(Backend::Ollama);
        assert_eq!(profile.advice.max_tokens, Some(800));
        assert_eq!(profile.advice.context_length, Some(2048));
        assert_eq!(profile.rag.max_tokens, Some(500));
        assert_eq!(profile.relevance.max_tokens, None);
        assert_eq!(profile.validation.temperature, Some(0.2));
    }
}
