//! Configuration for secadvise
//!
//! Loaded from TOML; every section has defaults so a partial file (or no file
//! at all) gives a working setup against a local Ollama or OpenAI.

use crate::eval::judge::DecodeTarget;
use crate::knowledge::{KnowledgeBase, ScoringRule, DEFAULT_TOP_K};
use crate::llm::prompts::PromptVersion;
use crate::llm::Backend;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecadviseConfig {
    /// Backend used for generation
    pub backend: Backend,

    pub openai: OpenAIConfig,

    pub ollama: OllamaConfig,

    pub prompts: PromptConfig,

    pub retrieval: RetrievalConfig,

    pub judge: JudgeConfig,
}

impl SecadviseConfig {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    /// Model name for the selected backend
    pub fn model(&self) -> &str {
        match self.backend {
            Backend::OpenAI => &self.openai.model,
            Backend::Ollama => &self.ollama.model,
        }
    }

    /// System prompt for `requested`, or for the configured default version
    /// when `requested` is absent or not a known version key
    pub fn system_prompt(&self, requested: Option<&str>) -> &'static str {
        requested
            .and_then(|key| key.parse::<PromptVersion>().ok())
            .unwrap_or(self.prompts.default_version)
            .prompt()
    }

    /// Knowledge base named by the retrieval section, or the built-in corpus
    pub fn knowledge_base(&self) -> Result<KnowledgeBase> {
        match &self.retrieval.knowledge_path {
            Some(path) => KnowledgeBase::from_file(path)
                .with_context(|| format!("Failed to load knowledge base {}", path.display())),
            None => Ok(KnowledgeBase::security()),
        }
    }
}

/// OpenAI Chat Completions settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Explicit key; takes precedence over `api_key_env`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    /// Alternative API base, e.g. a proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            base_url: None,
        }
    }
}

/// Local Ollama daemon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self { host: "http://localhost".to_string(), port: 11434, model: "llama3".to_string() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Version used by `ask` and `prompts show` when no version is named
    pub default_version: PromptVersion,
}

/// Retriever settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub scoring: ScoringRule,
    /// TOML knowledge file replacing the built-in corpus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_path: Option<PathBuf>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: DEFAULT_TOP_K, scoring: ScoringRule::default(), knowledge_path: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// How structured evaluator output is decoded
    pub decode: DecodeTarget,
}

/// Example configuration TOML
pub const EXAMPLE_CONFIG: &str = r#"
# secadvise configuration

backend = "ollama"

[openai]
api_key_env = "OPENAI_API_KEY"
model = "gpt-4o-mini"

[ollama]
host = "http://localhost"
port = 11434
model = "llama3"

[prompts]
default_version = "v3"

[retrieval]
top_k = 3
scoring = "weighted"

[judge]
decode = "mapping"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::prompts::{SECURITY_PROMPT_V1, SECURITY_PROMPT_V3, SECURITY_PROMPT_V4};

    #[test]
    fn test_default_config() {
        let config = SecadviseConfig::default();
        assert_eq!(config.backend, Backend::OpenAI);
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.ollama.port, 11434);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.prompts.default_version, PromptVersion::V3);
    }

    #[test]
    fn test_parse_example_config() {
        let config: SecadviseConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.backend, Backend::Ollama);
        assert_eq!(config.model(), "llama3");
        assert_eq!(config.retrieval.scoring, ScoringRule::Weighted);
        assert_eq!(config.judge.decode, DecodeTarget::Mapping);
    }

    #[test]
    fn test_partial_config() {
        let config: SecadviseConfig = toml::from_str(
            r#"
[retrieval]
scoring = "simple"
"#,
        )
        .unwrap();
        assert_eq!(config.retrieval.scoring, ScoringRule::Simple);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.backend, Backend::OpenAI);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secadvise.toml");

        let mut config = SecadviseConfig::default();
        config.backend = Backend::Ollama;
        config.ollama.model = "mistral".to_string();
        config.retrieval.top_k = 5;
        config.save(&path).unwrap();

        let loaded = SecadviseConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.model(), "mistral");
    }

    #[test]
    fn test_missing_file() {
        let err = SecadviseConfig::from_file(Path::new("/nonexistent/secadvise.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_system_prompt_follows_default_version() {
        let mut config = SecadviseConfig::default();
        assert_eq!(config.system_prompt(None), SECURITY_PROMPT_V3);

        config.prompts.default_version = PromptVersion::V4;
        assert_eq!(config.system_prompt(None), SECURITY_PROMPT_V4);
        assert_eq!(config.system_prompt(Some("v9")), SECURITY_PROMPT_V4);
        assert_eq!(config.system_prompt(Some("v1")), SECURITY_PROMPT_V1);
    }

    #[test]
    fn test_default_version_from_file() {
        let config: SecadviseConfig = toml::from_str(
            r#"
[prompts]
default_version = "v4"
"#,
        )
        .unwrap();
        assert_eq!(config.system_prompt(None), SECURITY_PROMPT_V4);
    }

    #[test]
    fn test_builtin_knowledge_base() {
        let kb = SecadviseConfig::default().knowledge_base().unwrap();
        assert_eq!(kb.len(), 5);
    }
}
