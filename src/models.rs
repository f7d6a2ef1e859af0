// models.rs
// Domain record types shared across input, geocoding, and storage.

/// One coordinate row read from the input CSV.
///
/// Rows are read-only: each one flows through a single pipeline execution and
/// is discarded after its persistence attempt. `distance_km` and
/// `bearing_degrees` are carried through to the `coordinate_points` table
/// unchanged when the input provides them.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    /// Latitude in decimal degrees, -90..90.
    pub latitude: f64,
    /// Longitude in decimal degrees, -180..180.
    pub longitude: f64,
    /// Optional distance column from the input, kilometers.
    pub distance_km: Option<f64>,
    /// Optional bearing column from the input, degrees 0..360.
    pub bearing_degrees: Option<f64>,
}

/// A structured postal address assembled from geocoder components.
///
/// All fields start out `None`. The extractor fills the seven address fields
/// from the component list; the pipeline merges `latitude`/`longitude` in
/// from the originating [`CoordinateRecord`] before validation. An address is
/// complete when all nine fields are populated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredAddress {
    /// Country long name.
    pub country: Option<String>,
    /// State or province, short name (e.g. "RS").
    pub state: Option<String>,
    /// City long name.
    pub city: Option<String>,
    /// Neighborhood long name.
    pub neighborhood: Option<String>,
    /// Street number as returned by the geocoder.
    pub street_number: Option<String>,
    /// Street name.
    pub street_name: Option<String>,
    /// Postal code.
    pub postal_code: Option<String>,
    /// Latitude of the originating coordinate row.
    pub latitude: Option<f64>,
    /// Longitude of the originating coordinate row.
    pub longitude: Option<f64>,
}

impl StructuredAddress {
    /// True when extraction produced nothing: none of the seven address
    /// fields is populated. The coordinate fields are not consulted because
    /// they are merged in after extraction.
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.state.is_none()
            && self.city.is_none()
            && self.neighborhood.is_none()
            && self.street_number.is_none()
            && self.street_name.is_none()
            && self.postal_code.is_none()
    }
}
