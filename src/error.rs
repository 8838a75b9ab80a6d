//! Error types for the metar-info application.
//!
//! Decode failures and service failures share one enum so that the HTTP
//! layer can map every error to a status code in a single place.

use axum::http::StatusCode;
use thiserror::Error;

/// The main error type for metar-info operations.
#[derive(Error, Debug)]
pub enum MetarError {
    /// Report text was empty or whitespace-only
    #[error("Invalid Metar data: {raw:?}")]
    EmptyInput { raw: String },

    /// A required group (station identifier, observation time) did not match its shape
    #[error("Invalid {field} group. Token: {token}")]
    RequiredField { field: &'static str, token: String },

    /// A whole-number visibility was followed by something other than a fraction
    #[error("Invalid visibility token: {token} {next}")]
    MalformedVisibility { token: String, next: String },

    /// Any other failure while decoding a report
    #[error("Metar Parser failed to parse data: {raw} ({message})")]
    Decode { raw: String, message: String },

    /// The upstream provider has no report for the station
    #[error("Weather station not found: {station}")]
    StationNotFound { station: String },

    /// Upstream provider errors
    #[error("{message}")]
    RemoteApi { message: String },

    /// A required query parameter was not supplied
    #[error("query param {param} is missing")]
    MissingParameter { param: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl MetarError {
    /// Whether this error was raised by the report decoder
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            MetarError::EmptyInput { .. }
                | MetarError::RequiredField { .. }
                | MetarError::MalformedVisibility { .. }
                | MetarError::Decode { .. }
        )
    }

    /// HTTP status used when this error reaches a client
    pub fn status_code(&self) -> StatusCode {
        match self {
            MetarError::StationNotFound { .. } | MetarError::MissingParameter { .. } => {
                StatusCode::NOT_FOUND
            }
            MetarError::RemoteApi { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience type alias for Results with MetarError
pub type Result<T> = std::result::Result<T, MetarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_errors_are_classified() {
        let err = MetarError::RequiredField {
            field: "station",
            token: "K1".to_string(),
        };
        assert!(err.is_decode_error());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Invalid station group. Token: K1");

        let err = MetarError::RemoteApi {
            message: "boom".to_string(),
        };
        assert!(!err.is_decode_error());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_not_found_statuses() {
        let err = MetarError::StationNotFound {
            station: "ZZZZ".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = MetarError::MissingParameter {
            param: "scode".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "query param scode is missing");
    }
}
