//! RAG commands: grounded answers and context relevance

use anyhow::{Context, Result};
use secadvise_core::eval::EvalCase;
use secadvise_core::{SecadviseConfig, SecurityRagClient, retriever_from_config};

use super::connect;
use crate::cli::app::{RagArgs, RelevanceArgs};

async fn rag_client(config: &SecadviseConfig) -> Result<SecurityRagClient> {
    let retriever = retriever_from_config(config)?;
    let (provider, profile) = connect(config).await?;
    Ok(SecurityRagClient::new(provider, retriever, profile).with_top_k(config.retrieval.top_k))
}

pub async fn execute(args: RagArgs, config: &SecadviseConfig) -> Result<()> {
    let client = rag_client(config).await?;
    let supplied = (!args.contexts.is_empty()).then_some(args.contexts);

    let result = client
        .generate_rag_response(&args.query, supplied)
        .await
        .context("Failed to generate RAG response")?;

    if args.json {
        let case = EvalCase::from(result);
        println!("{}", serde_json::to_string_pretty(&case)?);
        return Ok(());
    }

    println!("{}", result.response);
    if !result.retrieval_context.is_empty() {
        println!("\nSources:");
        for (i, context) in result.retrieval_context.iter().enumerate() {
            println!("  {}. {}", i + 1, context);
        }
    }
    Ok(())
}

pub async fn relevance(args: RelevanceArgs, config: &SecadviseConfig) -> Result<()> {
    let client = rag_client(config).await?;
    let score = client
        .evaluate_context_relevance(&args.query, &args.context)
        .await
        .context("Failed to rate context relevance")?;

    println!("{:.2}", score);
    Ok(())
}
