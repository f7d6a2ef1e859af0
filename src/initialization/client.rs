//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

/// Initializes the HTTP client used for geocoding lookups.
///
/// The timeout bounds a single reverse-geocode request; the pipeline blocks
/// on each request before moving to the next row.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub async fn init_client(timeout_seconds: u64) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
}
