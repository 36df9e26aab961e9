use clap::{Parser, Subcommand};
use secadvise_core::llm::Backend;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "secadvise",
    version,
    about = "Secadvise - security advice from OpenAI or a local Ollama model",
    long_about = "Secadvise answers API security questions with a chat model, grounding answers in a small keyword-retrieved security knowledge base when asked."
)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured backend (openai or ollama)
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// Override the configured model for the selected backend
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank knowledge-base documents for a query
    #[command(about = "Show the knowledge-base context retrieved for a query")]
    Retrieve(RetrieveArgs),

    /// Ask a security question
    #[command(about = "Ask a security question, optionally with context or a prompt version")]
    Ask(AskArgs),

    /// Answer from retrieved knowledge-base context
    #[command(about = "Answer a question grounded in retrieved knowledge-base context")]
    Rag(RagArgs),

    /// Rate how relevant a context is to a query
    #[command(about = "Have the model rate context relevance between 0 and 1")]
    Relevance(RelevanceArgs),

    /// Check text for sensitive data exposure
    #[command(about = "Check text for keys, passwords, tokens and personal data")]
    Scan(ScanArgs),

    /// Audit security advice
    #[command(about = "Audit security advice against industry best practices")]
    Validate(ValidateArgs),

    /// Inspect prompt versions
    #[command(about = "List or show the versioned security prompts")]
    Prompts(PromptsArgs),

    /// Run a prompt through the evaluation model
    #[command(about = "Run an evaluator prompt through the judge model")]
    Judge(JudgeArgs),
}

#[derive(Parser, Debug)]
pub struct RetrieveArgs {
    #[arg(help = "Free-text query")]
    pub query: String,

    /// Number of documents to return
    #[arg(short = 'k', long, help = "Number of documents to return (defaults to the configured top_k)")]
    pub top_k: Option<usize>,

    /// Print topics and scores instead of bare content
    #[arg(long, help = "Show topic and score for every eligible document")]
    pub scores: bool,
}

#[derive(Parser, Debug)]
pub struct AskArgs {
    #[arg(help = "Security question")]
    pub query: String,

    /// Supporting context for the answer
    #[arg(long, help = "Context passed alongside the question")]
    pub context: Option<String>,

    /// Prompt version (v1-v4)
    #[arg(short, long, help = "System prompt version; unknown versions use the default")]
    pub prompt_version: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RagArgs {
    #[arg(help = "Security question")]
    pub query: String,

    /// Use these snippets instead of retrieving
    #[arg(long = "context", help = "Retrieval context snippet (repeatable); skips retrieval")]
    pub contexts: Vec<String>,

    /// Emit an evaluation record as JSON
    #[arg(long, help = "Print the answer as a JSON evaluation record")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RelevanceArgs {
    #[arg(help = "Query the context should answer")]
    pub query: String,

    #[arg(help = "Context to rate")]
    pub context: String,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[arg(help = "Text to check for sensitive data")]
    pub text: String,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[arg(help = "Advice to audit")]
    pub advice: String,

    /// Advice category, e.g. authentication or encryption
    #[arg(long, help = "Advice category", default_value = "security")]
    pub category: String,
}

#[derive(Parser, Debug)]
pub struct PromptsArgs {
    #[command(subcommand)]
    pub action: PromptsAction,
}

#[derive(Subcommand, Debug)]
pub enum PromptsAction {
    /// List available prompt versions
    List,
    /// Print a prompt version
    Show {
        #[arg(help = "Version to print (defaults to the configured default)")]
        version: Option<String>,
    },
}

#[derive(Parser, Debug)]
pub struct JudgeArgs {
    #[arg(help = "Evaluator prompt")]
    pub prompt: String,

    /// Decode the reply as JSON using the configured decode target
    #[arg(long, help = "Decode the reply as a JSON object")]
    pub structured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_retrieve() {
        let cli = Cli::parse_from(["secadvise", "retrieve", "sql injection", "-k", "2", "--scores"]);
        match cli.command {
            Commands::Retrieve(args) => {
                assert_eq!(args.query, "sql injection");
                assert_eq!(args.top_k, Some(2));
                assert!(args.scores);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_backend() {
        let cli = Cli::parse_from(["secadvise", "--backend", "ollama", "-vv", "prompts", "list"]);
        assert_eq!(cli.backend, Some(Backend::Ollama));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_rag_contexts() {
        let cli = Cli::parse_from(["secadvise", "rag", "q", "--context", "a", "--context", "b", "--json"]);
        match cli.command {
            Commands::Rag(args) => {
                assert_eq!(args.contexts, vec!["a".to_string(), "b".to_string()]);
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_backend_rejected() {
        assert!(Cli::try_parse_from(["secadvise", "--backend", "gemini", "prompts", "list"]).is_err());
    }
}
