//! Retrieve command - show ranked knowledge-base context

use anyhow::Result;
use secadvise_core::{SecadviseConfig, retriever_from_config};
use tracing::info;

use crate::cli::app::RetrieveArgs;

pub fn execute(args: RetrieveArgs, config: &SecadviseConfig) -> Result<()> {
    let retriever = retriever_from_config(config)?;
    let top_k = args.top_k.unwrap_or(config.retrieval.top_k);
    info!(query = %args.query, top_k, rule = ?retriever.rule(), "Retrieving context");

    if args.scores {
        let ranked = retriever.rank(&args.query);
        if ranked.is_empty() {
            println!("No matching documents.");
        }
        for (rank, doc) in ranked.iter().take(top_k).enumerate() {
            println!("{}. [{}] {} (score {})", rank + 1, doc.index, doc.topic, doc.score);
            println!("   {}", doc.content);
        }
        return Ok(());
    }

    let contexts = retriever.retrieve(&args.query, top_k);
    if contexts.is_empty() {
        println!("No matching documents.");
    }
    for context in contexts {
        println!("{}", context);
    }

    Ok(())
}
