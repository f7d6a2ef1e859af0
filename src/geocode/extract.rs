//! Address extraction from geocoder components.

use crate::geocode::types::AddressComponent;
use crate::models::StructuredAddress;

/// Builds a partial [`StructuredAddress`] from an ordered component list.
///
/// Pure transformation. Each component's type tags are checked against a
/// fixed mapping; a component carrying several recognized tags populates
/// several fields. Unrecognized tags are ignored. Later components overwrite
/// earlier ones for the same field. The coordinate fields are left `None`;
/// the pipeline merges them in from the originating row.
pub fn extract_address(components: &[AddressComponent]) -> StructuredAddress {
    let mut address = StructuredAddress::default();

    for component in components {
        for tag in &component.types {
            match tag.as_str() {
                "country" => address.country = Some(component.long_name.clone()),
                "administrative_area_level_1" => address.state = Some(component.short_name.clone()),
                "administrative_area_level_2" => address.city = Some(component.long_name.clone()),
                "sublocality_level_1" => address.neighborhood = Some(component.long_name.clone()),
                "street_number" => address.street_number = Some(component.long_name.clone()),
                "route" => address.street_name = Some(component.long_name.clone()),
                "postal_code" => address.postal_code = Some(component.long_name.clone()),
                _ => {}
            }
        }
    }

    address
}
