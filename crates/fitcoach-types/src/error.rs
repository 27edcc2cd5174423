use thiserror::Error;

/// Errors raised while filling in or submitting the questionnaire.
///
/// Only `EmptyBodySensitivity` is a submit-time check. The others guard the
/// individual setters the same way the input widgets bound their values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select at least one option for body sensitivity")]
    EmptyBodySensitivity,

    #[error("age must be at least {min}, got {actual}")]
    AgeBelowMinimum { min: u32, actual: u32 },

    #[error("height must be at least {min} cm, got {actual}")]
    HeightBelowMinimum { min: u32, actual: u32 },

    #[error("weight must be at least {min} kg, got {actual}")]
    WeightBelowMinimum { min: u32, actual: u32 },

    #[error("country must not be empty")]
    EmptyCountry,

    #[error("unknown country: '{0}'")]
    UnknownCountry(String),

    #[error("invalid {field}: '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

/// Errors from loading the reference data (country list).
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference data from {path}: {message}")]
    Read { path: String, message: String },

    #[error("malformed reference data: {0}")]
    Malformed(String),

    #[error("reference data contains no countries")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::AgeBelowMinimum { min: 16, actual: 12 };
        assert_eq!(err.to_string(), "age must be at least 16, got 12");
    }

    #[test]
    fn test_unknown_option_display() {
        let err = ValidationError::UnknownOption {
            field: "diet",
            value: "Carnivore".to_string(),
        };
        assert_eq!(err.to_string(), "invalid diet: 'Carnivore'");
    }

    #[test]
    fn test_reference_data_error_display() {
        let err = ReferenceDataError::Read {
            path: "countries.csv".to_string(),
            message: "not found".to_string(),
        };
        assert!(err.to_string().contains("countries.csv"));
        assert!(err.to_string().contains("not found"));
    }
}
