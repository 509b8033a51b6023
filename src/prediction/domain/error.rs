//! Error types for prediction input validation and parsing.

use thiserror::Error;

/// Errors returned while turning submitted form values into domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PredictionDomainError {
    /// A required form field was not submitted.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Form field name.
        field: &'static str,
    },

    /// A numeric field could not be parsed as its declared type.
    #[error("invalid value '{value}' for field '{field}', expected {expected}")]
    InvalidInput {
        /// Form field name.
        field: &'static str,
        /// Raw submitted value.
        value: String,
        /// Human-readable description of the accepted values.
        expected: &'static str,
    },

    /// A categorical field does not belong to its fixed enumeration.
    #[error("unrecognized {field} '{value}', expected one of: {allowed}")]
    UnrecognizedCategory {
        /// Categorical field name.
        field: &'static str,
        /// Raw submitted value.
        value: String,
        /// Comma-separated list of accepted members.
        allowed: String,
    },
}
