//! Prompts command - inspect versioned system prompts

use anyhow::Result;
use secadvise_core::SecadviseConfig;
use secadvise_core::llm::prompts::{PromptVersion, PromptVersionManager};

use crate::cli::app::{PromptsAction, PromptsArgs};

pub fn execute(args: PromptsArgs, config: &SecadviseConfig) -> Result<()> {
    let default = config.prompts.default_version;

    match args.action {
        PromptsAction::List => {
            for key in PromptVersionManager::list_versions() {
                let version: PromptVersion = key.parse().unwrap_or(default);
                let marker = if version == default { "*" } else { " " };
                println!("{} {}  {}", marker, key, version.description());
            }
        }
        PromptsAction::Show { version } => {
            let key = version.unwrap_or_else(|| default.key().to_string());
            println!("{}", PromptVersionManager::get_prompt(Some(&key)));
        }
    }

    Ok(())
}
