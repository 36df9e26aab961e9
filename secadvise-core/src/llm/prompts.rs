//! Security prompt library
//!
//! Versioned system prompts for the security assistant plus the fixed task
//! prompts and user-message builders used by the advisor and RAG clients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// v1: basic security assistant
pub const SECURITY_PROMPT_V1: &str = "You are a security assistant. Answer questions about API security.";

/// v2: adds focus areas
pub const SECURITY_PROMPT_V2: &str = "You are a security expert assistant. Provide accurate answers about:
- API security and authentication
- Common vulnerabilities (OWASP Top 10)
- Security best practices
Keep responses concise and actionable.";

/// v3: production prompt
pub const SECURITY_PROMPT_V3: &str = r#"You are a security expert assistant specializing in API security. 
Provide accurate, concise answers about:
- API security, authentication, and authorization
- Common vulnerabilities (SQL injection, XSS, CSRF, etc.)
- Security best practices and industry standards (OWASP, NIST)
- Incident response and threat mitigation

Guidelines:
- Focus on practical, actionable advice
- Cite security standards when relevant
- Warn about common pitfalls
- Prioritize defense-in-depth approaches
- Never suggest insecure practices

If the user asks "What is <concept>?" or requests a definition, follow this exact structure:

- Definition: Provide a single, concise sentence that directly defines the concept.
- Explanation: A short (1-3 sentence) explanation or context immediately after the definition.
- Mitigations: If relevant, include brief numbered mitigation steps or recommendations.

Example output when asked "What is SQL injection?":
Definition: SQL injection is a vulnerability that allows an attacker to manipulate database queries by injecting malicious input.
Explanation: It occurs when untrusted input is concatenated into SQL statements without proper parameterization.
Mitigations: 1) Use parameterized queries; 2) Validate and sanitize inputs; 3) Apply least privilege to DB accounts.

If the user asks about "risks" (e.g., "What are the security risks of X?"), start with a short, numbered list of the top 3 risks (each 1-2 sentences), then give brief mitigation steps for each risk. Keep the initial list concise and directly focused on the asked risk before adding broader recommendations.
"#;

/// v4: experimental, longer answers with examples
pub const SECURITY_PROMPT_V4: &str = r#"You are a senior security architect with expertise in API security.
Provide comprehensive guidance on:
- Authentication & Authorization (OAuth 2.0, JWT, API keys, RBAC)
- Input validation and sanitization
- Encryption (TLS, data at rest, key management)
- Common vulnerabilities and mitigations (OWASP Top 10)
- Security monitoring and incident response
- Compliance (GDPR, PCI-DSS, SOC 2)

Response format:
1. Direct answer to the question
2. Best practices and recommendations
3. Common pitfalls to avoid
4. Related security considerations

When the user requests a definition (queries beginning with "What is", "Define", etc.), follow this exact structure:

Definition: A single, concise sentence that directly defines the concept.
Explanation: A short explanation or context (1-3 sentences).
Mitigations: Brief numbered mitigation steps (if applicable).

Example:
Definition: X is ...
Explanation: ...
Mitigations: 1) ... 2) ...

Always prioritize security over convenience. Provide code examples when helpful.
"#;

/// Default system prompt for one-shot advice
pub const SECURITY_EXPERT_PROMPT: &str = "You are a security expert assistant. Provide accurate, \
concise answers about API security, authentication, authorization, and \
common vulnerabilities. Focus on practical, actionable advice.";

/// System prompt for answers grounded in retrieved context
pub const RAG_EXPERT_PROMPT: &str = "You are a security expert. Use the provided context to answer \
the question accurately. If the context doesn't contain enough information, \
acknowledge the limitations while providing the best answer possible.";

/// System prompt for the sensitive-data exposure check
pub const SENSITIVE_DATA_PROMPT: &str = "Analyze the following text for potential sensitive data exposure. \
Check for: API keys, passwords, tokens, email addresses, IP addresses, \
personal information. Return a JSON-like assessment.";

/// System prompt for rating context relevance
pub const RELEVANCE_RATING_PROMPT: &str = "Rate how relevant the given context is to answering the query. \
Return only a number between 0 and 1, where 0 is completely irrelevant and 1 is highly relevant.";

/// Known prompt versions, oldest first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptVersion {
    V1,
    V2,
    #[default]
    V3,
    V4,
}

impl PromptVersion {
    pub const ALL: [PromptVersion; 4] =
        [PromptVersion::V1, PromptVersion::V2, PromptVersion::V3, PromptVersion::V4];

    pub fn key(self) -> &'static str {
        match self {
            PromptVersion::V1 => "v1",
            PromptVersion::V2 => "v2",
            PromptVersion::V3 => "v3",
            PromptVersion::V4 => "v4",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            PromptVersion::V1 => SECURITY_PROMPT_V1,
            PromptVersion::V2 => SECURITY_PROMPT_V2,
            PromptVersion::V3 => SECURITY_PROMPT_V3,
            PromptVersion::V4 => SECURITY_PROMPT_V4,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PromptVersion::V1 => "Basic security assistant",
            PromptVersion::V2 => "Focus areas (OWASP Top 10)",
            PromptVersion::V3 => "Production: standards, pitfalls and answer structure",
            PromptVersion::V4 => "Experimental: detailed answers with code examples",
        }
    }
}

impl fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PromptVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptVersion::ALL
            .into_iter()
            .find(|v| v.key() == s)
            .ok_or_else(|| format!("unknown prompt version '{}'", s))
    }
}

/// Lookup of versioned security prompts
pub struct PromptVersionManager;

impl PromptVersionManager {
    pub const DEFAULT_VERSION: PromptVersion = PromptVersion::V3;

    /// Prompt text for `version`; missing or unknown keys get the default version
    pub fn get_prompt(version: Option<&str>) -> &'static str {
        version
            .and_then(|key| key.parse::<PromptVersion>().ok())
            .unwrap_or(Self::DEFAULT_VERSION)
            .prompt()
    }

    pub fn list_versions() -> Vec<&'static str> {
        PromptVersion::ALL.iter().map(|v| v.key()).collect()
    }
}

/// User-message builders for the security tasks
pub struct PromptTemplates;

impl PromptTemplates {
    /// Question with optional supporting context
    pub fn contextual_question(query: &str, context: Option<&str>) -> String {
        match context.filter(|c| !c.is_empty()) {
            Some(ctx) => format!("Context: {}\n\nQuestion: {}", ctx, query),
            None => query.to_string(),
        }
    }

    /// Numbered context block, one entry per retrieved snippet
    pub fn context_block(contexts: &[String]) -> String {
        contexts
            .iter()
            .enumerate()
            .map(|(i, ctx)| format!("Context {}: {}", i + 1, ctx))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn rag_question(query: &str, contexts: &[String]) -> String {
        format!(
            "Context information:\n{}\n\nQuestion: {}\n\nProvide a clear, accurate answer based on the context above.",
            Self::context_block(contexts),
            query
        )
    }

    pub fn relevance_question(query: &str, context: &str) -> String {
        format!("Query: {}\n\nContext: {}\n\nRelevance score:", query, context)
    }

    /// Auditor system prompt for one advice category
    pub fn auditor_prompt(category: &str) -> String {
        format!(
            "You are a security auditor. Review the following {} advice and verify it follows \
             industry best practices and standards (OWASP, NIST, etc.). Point out any issues or improvements.",
            category
        )
    }
}
