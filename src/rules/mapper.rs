use crate::domain::{Address, CleanedRow, DomainError, Geometry, Record};

/// Semantic mapping from a cleaned row to an output record. May fail for
/// reasons beyond shape (unparsable or out-of-range coordinates); a failure
/// is a counted rejection, never a stream error. Pure and order-preserving.
pub trait SemanticMapper: Send + Sync {
    fn map(&self, row: CleanedRow) -> Result<Record, DomainError>;
}

/// Default OpenAddresses mapper: builds a validated point geometry from the
/// LON/LAT columns, projects the address fields, and retains every cleaned
/// field as the record's source data.
#[derive(Debug, Clone, Default)]
pub struct OpenAddressesMapper;

impl SemanticMapper for OpenAddressesMapper {
    fn map(&self, row: CleanedRow) -> Result<Record, DomainError> {
        let lon = parse_coordinate(&row, "lon")?;
        let lat = parse_coordinate(&row, "lat")?;
        let geometry = Geometry::new(lon, lat)?;

        let address = Address {
            number: required_field(&row, "number")?.to_string(),
            street: required_field(&row, "street")?.to_string(),
            unit: optional_field(&row, "unit"),
            city: optional_field(&row, "city"),
            district: optional_field(&row, "district"),
            region: optional_field(&row, "region"),
            postcode: optional_field(&row, "postcode"),
        };

        Ok(Record {
            geometry,
            address,
            source_data: row.into_source_data(),
        })
    }
}

fn parse_coordinate(row: &CleanedRow, field: &str) -> Result<f64, DomainError> {
    let value = required_field(row, field)?;
    value
        .parse()
        .map_err(|_| DomainError::UnparsableCoordinate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn required_field<'a>(row: &'a CleanedRow, field: &str) -> Result<&'a str, DomainError> {
    match row.get(field) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DomainError::MissingField(field.to_string())),
    }
}

fn optional_field(row: &CleanedRow, field: &str) -> Option<String> {
    row.get(field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
