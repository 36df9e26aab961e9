//! Direct advice commands: ask, scan and validate

use anyhow::{Context, Result};
use secadvise_core::llm::prompts::PromptTemplates;
use secadvise_core::{SecadviseConfig, SecurityAdvisor};
use tracing::info;

use super::connect;
use crate::cli::app::{AskArgs, ScanArgs, ValidateArgs};

async fn advisor(config: &SecadviseConfig) -> Result<SecurityAdvisor> {
    let (provider, profile) = connect(config).await?;
    Ok(SecurityAdvisor::new(provider, profile))
}

pub async fn ask(args: AskArgs, config: &SecadviseConfig) -> Result<()> {
    let advisor = advisor(config).await?;

    let requested = args.prompt_version.as_deref();
    info!(?requested, default = %config.prompts.default_version, "Asking with security prompt");
    let prompt = config.system_prompt(requested);
    let question = PromptTemplates::contextual_question(&args.query, args.context.as_deref());

    let answer = advisor
        .get_security_advice(&question, Some(prompt))
        .await
        .context("Failed to generate security response")?;

    println!("{}", answer);
    Ok(())
}

pub async fn scan(args: ScanArgs, config: &SecadviseConfig) -> Result<()> {
    let advisor = advisor(config).await?;
    let report = advisor
        .check_sensitive_data_exposure(&args.text)
        .await
        .context("Failed to check for sensitive data")?;

    println!("{}", report.analysis);
    Ok(())
}

pub async fn validate(args: ValidateArgs, config: &SecadviseConfig) -> Result<()> {
    let advisor = advisor(config).await?;
    let review = advisor
        .validate_security_advice(&args.advice, &args.category)
        .await
        .context("Failed to validate security advice")?;

    println!("{}", review);
    Ok(())
}
