//! Docscan CLI - inventory the documents of a file share
//!
//! Usage:
//!   docscan [--config <docs_config.json>] [--output <output.json>] [--verbose]

use anyhow::{Context, Result};
use clap::Parser;
use docscan_core::{ScanConfig, ScanDriver, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT_FILE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docscan")]
#[command(about = "Docscan - extract, classify and inventory documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Scan configuration (JSON, or YAML with a .yaml/.yml suffix)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Report file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG wins over the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&cli.config, &cli.output) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &Path, output: &Path) -> Result<PathBuf> {
    let start = Instant::now();

    let config = ScanConfig::load(config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    let report = ScanDriver::default()
        .scan(&config)
        .context("Failed to scan documents")?;

    report
        .write_to(output)
        .with_context(|| format!("Failed to write report {}", output.display()))?;

    tracing::info!(
        "Processed {} files in {:.2}s",
        report.count,
        start.elapsed().as_secs_f64()
    );

    Ok(output.to_path_buf())
}
