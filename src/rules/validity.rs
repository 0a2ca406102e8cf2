use crate::domain::RawRow;

/// Structural validity check applied once per row by the pipeline's filter
/// stage. Pure: no side effects, no cross-row state.
pub trait ValidityPredicate: Send + Sync {
    /// True if the row meets the minimum shape requirements to be worth
    /// cleaning and mapping
    fn is_valid(&self, row: &RawRow) -> bool;
}

/// Columns a row must carry a non-empty value for before any semantic
/// interpretation is attempted
const REQUIRED_FIELDS: [&str; 4] = ["lon", "lat", "number", "street"];

/// Default structural check for OpenAddresses rows: coordinates, house
/// number, and street name must all be present and non-empty. Value content
/// is not inspected here; range and format checks belong to the mapper.
#[derive(Debug, Clone, Default)]
pub struct OpenAddressesValidity;

impl ValidityPredicate for OpenAddressesValidity {
    fn is_valid(&self, row: &RawRow) -> bool {
        REQUIRED_FIELDS
            .iter()
            .all(|field| row.get(field).is_some_and(|value| !value.is_empty()))
    }
}
