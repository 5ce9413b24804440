use thiserror::Error;

/// Common errors across surface and camera calibration
#[derive(Error, Debug)]
pub enum DscError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Numerical error: {0}")]
    Numerical(String),
}

/// Malformed surface description, raised while building a surface model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("unknown model {0}")]
    UnknownModel(String),

    #[error("{context}: missing field `{field}`")]
    MissingField { context: String, field: String },

    #[error("{context}: field `{field}` expected {expected}")]
    WrongType {
        context: String,
        field: String,
        expected: &'static str,
    },

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("cylinder axis has zero length")]
    DegenerateAxis,

    #[error("field `{field}` is not finite")]
    NonFinite { field: &'static str },

    #[error("`{field}` must be at least 1")]
    ZeroSubdivision { field: &'static str },
}

/// Camera queried before its parameters were installed, or installed twice
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidStateError {
    #[error("intrinsic parameters not set")]
    IntrinsicsNotSet,

    #[error("extrinsic parameters not set")]
    ExtrinsicsNotSet,

    #[error("intrinsic parameters already set")]
    IntrinsicsAlreadySet,

    #[error("extrinsic parameters already set")]
    ExtrinsicsAlreadySet,
}

pub type Result<T> = std::result::Result<T, DscError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::UnknownModel("cube".to_string());
        assert_eq!(err.to_string(), "unknown model cube");

        let err = ConfigurationError::MissingField {
            context: "cylinder".to_string(),
            field: "radius".to_string(),
        };
        assert_eq!(err.to_string(), "cylinder: missing field `radius`");

        let err = ConfigurationError::WrongType {
            context: "sphere".to_string(),
            field: "center".to_string(),
            expected: "object",
        };
        assert_eq!(err.to_string(), "sphere: field `center` expected object");

        let err = ConfigurationError::NonPositiveRadius(-1.5);
        assert_eq!(err.to_string(), "radius must be positive, got -1.5");
    }

    #[test]
    fn test_invalid_state_error_display() {
        assert_eq!(
            InvalidStateError::IntrinsicsNotSet.to_string(),
            "intrinsic parameters not set"
        );
        assert_eq!(
            InvalidStateError::ExtrinsicsAlreadySet.to_string(),
            "extrinsic parameters already set"
        );
    }

    #[test]
    fn test_dsc_error_from_configuration_error() {
        let err: DscError = ConfigurationError::DegenerateAxis.into();
        assert!(matches!(err, DscError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: cylinder axis has zero length"
        );
    }

    #[test]
    fn test_dsc_error_from_invalid_state_error() {
        let err: DscError = InvalidStateError::ExtrinsicsNotSet.into();
        assert!(matches!(err, DscError::InvalidState(_)));
        assert_eq!(err.to_string(), "Invalid state: extrinsic parameters not set");
    }

    #[test]
    fn test_dsc_error_not_implemented() {
        let err = DscError::NotImplemented("distortion".to_string());
        assert_eq!(err.to_string(), "Not implemented: distortion");
    }

    #[test]
    fn test_dsc_error_invalid_input() {
        let err = DscError::InvalidInput("focal length must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: focal length must be positive"
        );
    }
}
