//! Command handlers

pub mod advise;
pub mod judge;
pub mod prompts;
pub mod rag;
pub mod retrieve;

use anyhow::{Context, Result};
use secadvise_core::SecadviseConfig;
use secadvise_core::llm::{GenerationProfile, LLMProvider, provider_from_config};
use std::sync::Arc;
use tracing::debug;

/// Provider and sampling profile for the configured backend
pub async fn connect(config: &SecadviseConfig) -> Result<(Arc<dyn LLMProvider>, GenerationProfile)> {
    let provider = provider_from_config(config)
        .await
        .with_context(|| format!("Failed to initialise {} backend", config.backend))?;
    debug!(provider = provider.name(), model = provider.model(), "Backend ready");
    Ok((provider, GenerationProfile::for_backend(config.backend)))
}
