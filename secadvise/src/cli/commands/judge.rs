//! Judge command - run an evaluator prompt through the configured backend

use anyhow::{Context, Result};
use secadvise_core::SecadviseConfig;
use secadvise_core::eval::{JudgeModel, Structured};

use super::connect;
use crate::cli::app::JudgeArgs;

pub async fn execute(args: JudgeArgs, config: &SecadviseConfig) -> Result<()> {
    let (provider, profile) = connect(config).await?;
    let judge = JudgeModel::new(provider, profile.judge);

    if !args.structured {
        let reply = judge.generate(&args.prompt).await.context("Judge generation failed")?;
        println!("{}", reply);
        return Ok(());
    }

    let decoded = judge
        .generate_structured::<serde_json::Value>(&args.prompt, config.judge.decode)
        .await
        .context("Judge output could not be decoded")?;

    let value = match decoded {
        Structured::Mapping(map) => serde_json::Value::Object(map),
        Structured::Record(record) => record,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
