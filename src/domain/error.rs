use thiserror::Error;

/// Semantic rejection reasons: a row passed the structural validity check
/// but a record could not be derived from its field values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unparsable coordinate in field {field}: {value}")]
    UnparsableCoordinate { field: String, value: String },

    #[error("Longitude out of range: {0}")]
    LongitudeOutOfRange(f64),

    #[error("Latitude out of range: {0}")]
    LatitudeOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats_correctly() {
        assert_eq!(
            DomainError::MissingField("street".to_string()).to_string(),
            "Missing required field: street"
        );
        assert_eq!(
            DomainError::UnparsableCoordinate {
                field: "lon".to_string(),
                value: "abc".to_string(),
            }
            .to_string(),
            "Unparsable coordinate in field lon: abc"
        );
        assert_eq!(
            DomainError::LongitudeOutOfRange(-200.0).to_string(),
            "Longitude out of range: -200"
        );
    }

    #[test]
    fn error_is_cloneable() {
        let err = DomainError::MissingField("lat".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
