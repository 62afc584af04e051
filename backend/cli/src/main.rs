mod config;
mod pipeline;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use cardlens_providers::{GroqProvider, VisionOcr};

use config::Config;
use pipeline::Processor;
use storage::Storage;

#[derive(Parser)]
#[command(name = "cardlens")]
#[command(about = "CardLens — business-card OCR and field extraction")]
#[command(version)]
struct Cli {
    /// Path to the business-card image
    image_path: PathBuf,

    /// Card identifier recorded in the output
    #[arg(long, default_value_t = 1)]
    card_id: u64,

    /// Path to a file containing the Google Vision API key
    #[arg(long)]
    vision_credentials: Option<PathBuf>,

    /// Groq API key (overrides GROQ_API_KEY)
    #[arg(long)]
    groq_api_key: Option<String>,

    /// Model used for classification
    #[arg(long)]
    model: Option<String>,

    /// Do not write intermediate or result files
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    let vision_api_key = match &cli.vision_credentials {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading Vision credentials from {}", path.display()))?
            .trim()
            .to_string(),
        None => config
            .vision_api_key
            .context("no Vision API key: set GOOGLE_VISION_API_KEY or pass --vision-credentials")?,
    };
    let groq_api_key = cli
        .groq_api_key
        .or(config.groq_api_key)
        .context("no Groq API key: set GROQ_API_KEY or pass --groq-api-key")?;
    let model = cli.model.unwrap_or(config.model);

    let processor = Processor::new(
        Arc::new(VisionOcr::new(vision_api_key)),
        Arc::new(GroqProvider::new(groq_api_key)),
        model,
        Storage::new(&config.output_dir),
    );

    match processor
        .process_card(&cli.image_path, cli.card_id, !cli.no_save)
        .await
    {
        Ok(outcome) => {
            info!(card_id = outcome.result.card_id, "Card processed");
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            Ok(())
        }
        Err(e) => {
            error!(stage = %e.stage, error = %e, "Card processing failed");
            Err(e.into())
        }
    }
}
