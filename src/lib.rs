//! coordinate_transform library: coordinate-to-address batch resolution.
//!
//! Reads geographic coordinates from a CSV file, resolves each one to a
//! structured postal address through the Google Geocoding API, and persists
//! both the coordinate and the address to PostgreSQL. Per-row failures skip
//! the row; an API-level failure aborts the batch.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use coordinate_transform::{run_batch, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from([
//!     "coordinate_transform",
//!     "--path-to-csv",
//!     "coordinates.csv",
//!     "--google-maps-key",
//!     "<API KEY>",
//! ]);
//!
//! let report = run_batch(config).await?;
//! println!("Saved {} of {} coordinates", report.persisted, report.attempted);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime, a reachable PostgreSQL instance
//! configured through the `POSTGRES_*` environment variables, and a valid
//! Google Maps API key.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod geocode;
pub mod initialization;
pub mod input;
pub mod models;
pub mod pipeline;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::{run_batch, BatchReport};

// Internal run module (contains the batch orchestration)
mod run {
    use std::time::Instant;

    use anyhow::{bail, Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::geocode::GoogleGeocoder;
    use crate::initialization::init_client;
    use crate::input::{self, ColumnSelection};
    use crate::pipeline::BatchPipeline;
    use crate::storage::{init_db_pool, run_migrations, DbConfig, PgRecordStore};

    /// Results of a completed batch run.
    #[derive(Debug, Clone)]
    pub struct BatchReport {
        /// Rows that reached a terminal state.
        pub attempted: usize,
        /// Rows fully persisted.
        pub persisted: usize,
        /// Rows skipped because no candidate was returned.
        pub not_found: usize,
        /// Rows skipped because extraction produced nothing.
        pub empty_address: usize,
        /// Rows skipped by the completeness check.
        pub incomplete: usize,
        /// Rows skipped on an insert conflict.
        pub conflicts: usize,
        /// Rows skipped on any other insert failure.
        pub store_failures: usize,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    impl BatchReport {
        /// Rows that reached a terminal state other than persisted.
        pub fn skipped(&self) -> usize {
            self.attempted - self.persisted
        }
    }

    /// Runs a coordinate batch with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads coordinate
    /// rows from the input CSV, resolves each to an address, and stores the
    /// results in PostgreSQL.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The CSV file is missing or its column selection cannot be resolved
    /// - The database configuration is incomplete or the pool cannot connect
    /// - The API-key probe fails
    /// - A reverse-geocode call fails mid-batch (the batch is aborted; rows
    ///   after the failing one are never attempted)
    pub async fn run_batch(config: Config) -> Result<BatchReport> {
        info!(">>> Starting the coordinate converter");

        info!("Checking CSV file");
        if !config.csv_file.exists() {
            bail!("Path to csv not found: {}", config.csv_file.display());
        }
        let selection = ColumnSelection::from_cli(
            config.csv_column_names.as_deref(),
            config.csv_column_indexes.as_deref(),
        )?;
        let rows = input::read_coordinates(&config.csv_file, &selection)
            .context("Failed to read coordinates from CSV")?;
        info!("Total coordinates in file: {}", rows.len());

        let db_config = DbConfig::from_env().context("Failed to load database configuration")?;
        let pool = init_db_pool(&db_config)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let client = init_client(config.timeout_seconds)
            .await
            .context("Failed to initialize HTTP client")?;
        let geocoder = GoogleGeocoder::new(client, config.api_key.clone());

        info!("Checking API key");
        geocoder.probe_key().await.context("API key check failed")?;

        let pipeline = BatchPipeline::new(geocoder, PgRecordStore::new(pool));

        let start_time = Instant::now();
        let summary = pipeline.run(&rows).await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        info!(
            "Batch finished: attempted={}, saved={}, not_found={}, empty={}, incomplete={}, conflicts={}, store_failures={}",
            summary.attempted(),
            summary.persisted,
            summary.not_found,
            summary.empty_address,
            summary.incomplete,
            summary.conflicts,
            summary.store_failures
        );

        if let Some(e) = summary.aborted {
            return Err(
                anyhow::Error::new(e).context("Reverse geocoding API failure aborted the batch")
            );
        }

        Ok(BatchReport {
            attempted: summary.attempted(),
            persisted: summary.persisted,
            not_found: summary.not_found,
            empty_address: summary.empty_address,
            incomplete: summary.incomplete,
            conflicts: summary.conflicts,
            store_failures: summary.store_failures,
            elapsed_seconds,
        })
    }
}
