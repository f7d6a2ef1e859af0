//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECONDS};

/// Logging level for the application.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable `[timestamp] [level] [message]` lines (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options.
///
/// The CSV path and the API key are required; everything else has a default.
/// Column selection by name and by index are mutually exclusive.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "coordinate_transform",
    about = "Converts and saves geographical coordinates from a CSV file to the database."
)]
pub struct Config {
    /// Path to the CSV file containing geographical coordinates
    #[arg(short = 'p', long = "path-to-csv", value_name = "FILE")]
    pub csv_file: PathBuf,

    /// API key for the Google Maps geocoding service
    #[arg(short = 'k', long = "google-maps-key", value_name = "KEY")]
    pub api_key: String,

    /// Activates debug log level
    #[arg(short, long)]
    pub verbose: bool,

    /// Mirrors log output on the terminal in addition to the log file
    #[arg(short, long)]
    pub output: bool,

    /// Comma-separated header names of the columns to read,
    /// e.g. `latitude_coordinate,longitude_coordinate`
    #[arg(
        short = 'n',
        long = "csv-column-names",
        value_name = "NAMES",
        conflicts_with = "csv_column_indexes"
    )]
    pub csv_column_names: Option<String>,

    /// Comma-separated positional indexes of the columns to read, e.g. `1,3`
    #[arg(short = 'i', long = "csv-column-indexes", value_name = "INDEXES")]
    pub csv_column_indexes: Option<String>,

    /// Log file path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Per-request timeout for geocoding lookups, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,
}

impl Config {
    /// Effective log level: `--verbose` selects Debug, otherwise Info.
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}
