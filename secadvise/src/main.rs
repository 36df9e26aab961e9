use anyhow::Result;
use clap::Parser;
use secadvise_core::SecadviseConfig;
use secadvise_core::llm::Backend;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI arguments first to get verbosity level
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        2.. => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config = load_config(&cli)?;
    debug!(backend = %config.backend, model = config.model(), "Configuration loaded");

    match cli.command {
        Commands::Retrieve(args) => {
            info!("Retrieve command: {:?}", args);
            cli::commands::retrieve::execute(args, &config)?;
        }
        Commands::Prompts(args) => {
            info!("Prompts command: {:?}", args);
            cli::commands::prompts::execute(args, &config)?;
        }
        Commands::Ask(args) => {
            info!("Ask command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::advise::ask(args, &config))?;
        }
        Commands::Scan(args) => {
            info!("Scan command");
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::advise::scan(args, &config))?;
        }
        Commands::Validate(args) => {
            info!("Validate command: category {}", args.category);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::advise::validate(args, &config))?;
        }
        Commands::Rag(args) => {
            info!("Rag command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::rag::execute(args, &config))?;
        }
        Commands::Relevance(args) => {
            info!("Relevance command: {:?}", args);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::rag::relevance(args, &config))?;
        }
        Commands::Judge(args) => {
            info!("Judge command: structured={}", args.structured);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(cli::commands::judge::execute(args, &config))?;
        }
    }

    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn load_config(cli: &Cli) -> Result<SecadviseConfig> {
    let mut config = match &cli.config {
        Some(path) => SecadviseConfig::from_file(path)?,
        None => SecadviseConfig::default(),
    };

    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    if let Some(model) = &cli.model {
        match config.backend {
            Backend::OpenAI => config.openai.model = model.clone(),
            Backend::Ollama => config.ollama.model = model.clone(),
        }
    }

    Ok(config)
}
