use std::collections::BTreeMap;

use serde::Serialize;

use super::error::DomainError;

/// A WGS84 point, validated at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    lon: f64,
    lat: f64,
}

impl Geometry {
    /// Create a point, rejecting coordinates outside WGS84 bounds
    pub fn new(lon: f64, lat: f64) -> Result<Self, DomainError> {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::LongitudeOutOfRange(lon));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::LatitudeOutOfRange(lat));
        }
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
}

/// Structured address fields projected from one cleaned row.
///
/// `number` and `street` are always present; the remaining OpenAddresses
/// columns are optional and carried through when the source file has them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub number: String,
    pub street: String,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub postcode: Option<String>,
}

/// The final output unit of the pipeline, derived from exactly one cleaned
/// row. Immutable once emitted; ownership passes to the consumer.
///
/// `source_data` retains every cleaned input field so downstream indexers
/// can reach columns this projection does not model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub geometry: Geometry,
    pub address: Address,
    pub source_data: BTreeMap<String, String>,
}
