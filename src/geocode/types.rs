//! Geocoding service response types.

use serde::Deserialize;

/// One fragment of a geocoding candidate: a display name pair plus the
/// semantic type tags that say what the fragment is (e.g. `route`,
/// `postal_code`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddressComponent {
    /// Full display name.
    pub long_name: String,
    /// Abbreviated display name (e.g. state code).
    pub short_name: String,
    /// Semantic type tags.
    #[serde(default)]
    pub types: Vec<String>,
}

/// One candidate returned by a reverse lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeCandidate {
    /// Ordered address-component list.
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

/// Top-level reverse-geocode response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Service status: `OK`, `ZERO_RESULTS`, or an error status.
    pub status: String,
    /// Candidates, best match first. Empty unless `status` is `OK`.
    #[serde(default)]
    pub results: Vec<GeocodeCandidate>,
    /// Error detail accompanying a non-OK status, when the service sends one.
    #[serde(default)]
    pub error_message: Option<String>,
}

#[cfg(test)]
impl AddressComponent {
    /// Test helper: a component whose long and short names coincide.
    pub fn tagged(name: &str, tags: &[&str]) -> AddressComponent {
        AddressComponent {
            long_name: name.to_string(),
            short_name: name.to_string(),
            types: tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }
}
