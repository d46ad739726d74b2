//! Harmock CLI

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use harmock::capture::{Capture, CaptureExtractor};
use harmock::config::{Config, DEFAULT_CONFIG_FILE};
use harmock::generate::MockWriter;

/// Generate mock handlers and JSON fixtures from a HAR capture
#[derive(Debug, Parser)]
#[command(name = "harmock", version, about)]
struct Cli {
    /// Config file
    #[arg(short = 't', long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Print the routes that would be generated without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Log every file decision
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    if cli.dry_run {
        return dry_run(&config);
    }

    // Per-entry failures are logged by the writer and do not fail the run.
    harmock::generate(&config).await?;
    Ok(())
}

fn dry_run(config: &Config) -> anyhow::Result<()> {
    let capture = Capture::from_file(&config.har_path)?;
    let extractor = CaptureExtractor::from_config(config)?;
    let writer = MockWriter::from_config(config, config.renderer()?);

    for entry in extractor.extract(&capture).values() {
        println!(
            "{} {} -> {} ({})",
            entry.method.to_uppercase(),
            entry.api,
            writer.entry_dir(entry).display(),
            writer.identifier_for(entry)
        );
    }

    Ok(())
}
