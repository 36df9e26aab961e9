//! Security knowledge base
//!
//! Holds the documents the retriever scores against and the keyword-expansion
//! table that broadens topical queries. Both are built once and shared
//! read-only; nothing in the crate mutates them after construction.

pub mod retrieval;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use retrieval::{ContextRetriever, ScoredDocument, ScoringRule, DEFAULT_TOP_K};

/// A single knowledge-base entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Short subject label, matched with a higher weight than the body
    pub topic: String,
    /// Body text handed to the model as retrieval context
    pub content: String,
}

impl Document {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self { topic: topic.into(), content: content.into() }
    }
}

/// Trigger term and the keywords it pulls into matching
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    pub trigger: String,
    pub keywords: Vec<String>,
}

/// Ordered trigger → keywords mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionTable {
    entries: Vec<Expansion>,
}

impl ExpansionTable {
    pub fn new(entries: Vec<Expansion>) -> Self {
        Self { entries }
    }

    /// Table tuned for the built-in security corpus
    pub fn security() -> Self {
        let entry = |trigger: &str, keywords: &[&str]| Expansion {
            trigger: trigger.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };

        Self::new(vec![
            entry("authentication", &["authentication", "auth", "oauth", "jwt"]),
            entry("sql", &["sql", "injection", "database"]),
            entry("xss", &["xss", "cross-site", "scripting"]),
            entry("rate", &["rate", "limiting", "ddos"]),
            entry("privilege", &["privilege", "rbac", "access"]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expansion> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors raised while building a knowledge base from external data
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse knowledge file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Knowledge base must contain at least one document")]
    Empty,
}

/// On-disk shape of a knowledge file
#[derive(Debug, Deserialize)]
struct KnowledgeFile {
    documents: Vec<Document>,
    #[serde(default)]
    expansions: Option<ExpansionTable>,
}

/// Immutable document corpus plus its expansion table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    documents: Vec<Document>,
    expansions: ExpansionTable,
}

impl KnowledgeBase {
    /// Build a knowledge base, rejecting an empty corpus
    pub fn new(documents: Vec<Document>, expansions: ExpansionTable) -> Result<Self, KnowledgeError> {
        if documents.is_empty() {
            return Err(KnowledgeError::Empty);
        }
        Ok(Self { documents, expansions })
    }

    /// The five built-in security documents
    pub fn security() -> Self {
        Self {
            documents: vec![
                Document::new(
                    "SQL Injection",
                    "SQL injection is a code injection technique that exploits vulnerabilities in database queries. Prevention: use parameterized queries, input validation, and ORM frameworks.",
                ),
                Document::new(
                    "XSS Prevention",
                    "Cross-Site Scripting (XSS) attacks inject malicious scripts. Mitigation: sanitize input, encode output, use Content Security Policy headers, and HTTP-only cookies.",
                ),
                Document::new(
                    "API Rate Limiting",
                    "Rate limiting controls API request frequency to prevent abuse. Strategies: fixed window, sliding window, token bucket. Protects against DDoS and ensures fair usage.",
                ),
                Document::new(
                    "Authentication Best Practices",
                    "Use OAuth 2.0 for third-party access, JWT for stateless auth, secure password hashing (bcrypt, Argon2), MFA, and proper session management.",
                ),
                Document::new(
                    "Least Privilege",
                    "Grant minimum necessary permissions. Implement RBAC, just-in-time access, regular audits. Reduces attack surface and breach impact.",
                ),
            ],
            expansions: ExpansionTable::security(),
        }
    }

    /// Load documents (and optionally expansions) from a TOML file.
    ///
    /// When the file has no `expansions` table the security table is used.
    pub fn from_file(path: &Path) -> Result<Self, KnowledgeError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|source| KnowledgeError::Io { path: display.clone(), source })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            KnowledgeError::Parse { source, .. } => KnowledgeError::Parse { path: display, source },
            other => other,
        })
    }

    /// Parse a knowledge base from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = toml::from_str(content).map_err(|source| KnowledgeError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        Self::new(file.documents, file.expansions.unwrap_or_else(ExpansionTable::security))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn expansions(&self) -> &ExpansionTable {
        &self.expansions
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Always false; construction rejects an empty corpus
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::security()
    }
}
