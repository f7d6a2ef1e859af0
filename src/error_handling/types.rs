//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error setting up the logger sink (e.g. log file creation).
    #[error("Logger initialization error: {0}")]
    LoggerSetupError(String),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database configuration and connection.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A required POSTGRES_* environment variable is not set.
    #[error("Missing database setting: {0} is not set")]
    MissingSetting(&'static str),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Failures of the reverse-geocoding service boundary.
///
/// Every variant is fatal to the whole batch: a denied credential or an
/// exhausted quota will fail identically for every remaining row. A lookup
/// that merely returns no candidates is not an error; the resolver reports
/// it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Transport-level failure (connect, timeout, or undecodable body).
    #[error("geocoding request failed: {0}")]
    Transport(#[from] ReqwestError),

    /// The service rejected the request, typically an invalid API key.
    #[error("geocoding request denied: {0}")]
    RequestDenied(String),

    /// The account is over its query limit.
    #[error("geocoding quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other non-OK status reported by the service.
    #[error("unexpected geocoding status {status}: {message}")]
    UnexpectedStatus {
        /// Status string as returned by the service.
        status: String,
        /// Accompanying error message, empty if the service sent none.
        message: String,
    },
}

/// Errors reading the coordinate CSV.
#[derive(Error, Debug)]
pub enum InputError {
    /// CSV file could not be opened or parsed.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// The column selection string could not be parsed.
    #[error("Error parsing columns: {0}")]
    ColumnSpec(String),

    /// A selected column is missing from the CSV header.
    #[error("Column not found in CSV header: {0}")]
    MissingColumn(String),
}
