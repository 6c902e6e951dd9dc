use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use socialpulse::app::ports::RecordSink;
use socialpulse::domain::{CanonicalRecord, RawRecord};
use socialpulse::logging::init_logging;
use socialpulse::pipeline::storage::InMemoryStore;
use socialpulse::{EtlConfig, EtlPipeline};

#[derive(Parser)]
#[command(name = "socialpulse")]
#[command(about = "Social media ETL: normalize, label, and load scraped posts")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline over a JSON array of raw posts
    Run {
        /// Path to a JSON file containing an array of raw post objects
        #[arg(long)]
        input: PathBuf,
    },
    /// Stream a JSON-lines file through the pipeline in fixed-size batches
    Stream {
        /// Path to a JSON-lines file, one raw post object per line
        #[arg(long)]
        input: PathBuf,
        /// Override the configured batch size
        #[arg(long)]
        batch_size: Option<usize>,
    },
}

/// Sink that traces delivered records; storage already holds them.
struct TraceSink;

#[async_trait::async_trait]
impl RecordSink for TraceSink {
    async fn deliver(&self, record: &CanonicalRecord) -> socialpulse::Result<()> {
        info!(
            post_id = %record.post_id,
            platform = %record.platform,
            sentiment = %record.sentiment_label,
            engagement = %record.engagement_level,
            "record ready"
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = EtlConfig::load()?;

    match cli.command {
        Commands::Run { input } => {
            let content = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let records: Vec<RawRecord> =
                serde_json::from_str(&content).context("input must be a JSON array")?;

            let store = Arc::new(InMemoryStore::new());
            let mut pipeline = EtlPipeline::new(store, &config);
            let summary = pipeline.run(&records).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Stream { input, batch_size } => {
            let mut config = config;
            if let Some(batch_size) = batch_size {
                config.pipeline.batch_size = batch_size;
            }

            let file = fs::File::open(&input)
                .with_context(|| format!("failed to open {}", input.display()))?;
            let source = BufReader::new(file).lines().filter_map(|line| match line {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => match serde_json::from_str::<RawRecord>(&line) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!(error = %e, "skipping unparseable line");
                        None
                    }
                },
                Err(e) => {
                    warn!(error = %e, "failed to read line");
                    None
                }
            });

            let store = Arc::new(InMemoryStore::new());
            let mut pipeline = EtlPipeline::new(store, &config);
            let summary = pipeline.run_streaming(source, &TraceSink).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
