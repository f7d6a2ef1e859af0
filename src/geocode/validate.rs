//! Address completeness validation.

use crate::models::StructuredAddress;

/// True iff every one of the nine address fields is populated.
///
/// The coordinate fields count: an address straight out of extraction is
/// never complete until the pipeline has merged latitude and longitude in
/// from the originating row.
pub fn is_complete(address: &StructuredAddress) -> bool {
    address.country.is_some()
        && address.state.is_some()
        && address.city.is_some()
        && address.neighborhood.is_some()
        && address.street_number.is_some()
        && address.street_name.is_some()
        && address.postal_code.is_some()
        && address.latitude.is_some()
        && address.longitude.is_some()
}
