//! Reverse geocoding against the Google Geocoding API.
//!
//! [`GoogleGeocoder`] wraps the HTTP call; lookups are constrained to
//! street-address precision with rooftop-level accuracy. A lookup has three
//! outcomes:
//! - `Ok(Some(components))` -- the first candidate's component list,
//! - `Ok(None)` -- the service found no candidate for the coordinate,
//! - `Err(GeocodeError)` -- transport, credential, or quota failure, which
//!   is fatal to the whole batch.

mod extract;
mod types;
mod validate;

pub use extract::extract_address;
pub use types::{AddressComponent, GeocodeCandidate, GeocodeResponse};
pub use validate::is_complete;

use async_trait::async_trait;
use log::debug;

use crate::config::{
    GEOCODE_ENDPOINT, GEOCODE_LOCATION_TYPE, GEOCODE_RESULT_TYPE, KEY_PROBE_COORDINATE,
};
use crate::error_handling::GeocodeError;

/// Resolves a coordinate pair to the address components of its best
/// street-address candidate.
#[async_trait]
pub trait ReverseGeocode {
    /// Reverse-geocodes one coordinate. `Ok(None)` means the service
    /// returned no candidates; any `Err` is fatal to the batch.
    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Vec<AddressComponent>>, GeocodeError>;
}

/// Google Geocoding API client.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GoogleGeocoder {
    /// Creates a geocoder that authenticates with the given API key.
    pub fn new(client: reqwest::Client, api_key: String) -> GoogleGeocoder {
        GoogleGeocoder {
            client,
            api_key,
            endpoint: GEOCODE_ENDPOINT.to_string(),
        }
    }

    /// Checks the API key with a single lookup against a fixed coordinate.
    ///
    /// Run before the batch starts so a bad credential fails the run up
    /// front instead of on the first row.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`GeocodeError`] when the probe lookup fails.
    pub async fn probe_key(&self) -> Result<(), GeocodeError> {
        let (latitude, longitude) = KEY_PROBE_COORDINATE;
        self.resolve(latitude, longitude).await?;
        debug!("API key OK");
        Ok(())
    }
}

#[async_trait]
impl ReverseGeocode for GoogleGeocoder {
    async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<Vec<AddressComponent>>, GeocodeError> {
        let latlng = format!("{latitude},{longitude}");
        debug!("Reverse geocoding ({latlng})");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latlng", latlng.as_str()),
                ("result_type", GEOCODE_RESULT_TYPE),
                ("location_type", GEOCODE_LOCATION_TYPE),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let body = response.json::<GeocodeResponse>().await?;
        interpret_response(body)
    }
}

/// Maps the service status onto the three lookup outcomes.
fn interpret_response(
    body: GeocodeResponse,
) -> Result<Option<Vec<AddressComponent>>, GeocodeError> {
    let message = body.error_message.unwrap_or_default();
    match body.status.as_str() {
        "OK" => Ok(body
            .results
            .into_iter()
            .next()
            .map(|candidate| candidate.address_components)),
        "ZERO_RESULTS" => Ok(None),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(GeocodeError::QuotaExceeded(message)),
        "REQUEST_DENIED" => Err(GeocodeError::RequestDenied(message)),
        status => Err(GeocodeError::UnexpectedStatus {
            status: status.to_string(),
            message,
        }),
    }
}
