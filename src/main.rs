//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `coordinate_transform` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use coordinate_transform::initialization::init_logger_with;
use coordinate_transform::{run_batch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // .env can carry the POSTGRES_* connection settings
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(
        config.log_level().into(),
        config.log_format,
        &config.log_file,
        config.output,
    )
    .context("Failed to initialize logger")?;

    match run_batch(config.clone()).await {
        Ok(report) => {
            println!(
                "✅ Processed {} coordinate{} ({} saved, {} skipped) in {:.1}s - see {} for per-row outcomes",
                report.attempted,
                if report.attempted == 1 { "" } else { "s" },
                report.persisted,
                report.skipped(),
                report.elapsed_seconds,
                config.log_file.display()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("coordinate_transform error: {:#}", e);
            process::exit(1);
        }
    }
}
