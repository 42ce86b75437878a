//! # Error Types
//!
//! Structured error types for amp_core. Every failure carries enough context
//! for the caller to act on it without logs: validation failures name the
//! offending field, and range failures name the standard table that ran out.
//!
//! ## Example
//!
//! ```rust
//! use amp_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_m: f64) -> CalcResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_m",
//!             length_m.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for amp_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// `InvalidInput`, `MissingField`, `NonFinite` and `UnrecognizedOption` are
/// validation failures: they are raised before any formula runs.
/// `RangeExceeded` is raised when a computed requirement is larger than every
/// entry of a standard ratings table.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is outside its declared range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A numeric field is NaN or infinite
    #[error("Non-finite value for '{field}'")]
    NonFinite { field: String },

    /// An enumerated field holds a token outside its closed set
    #[error("Unrecognized option for '{field}': {value} (expected one of: {expected})")]
    UnrecognizedOption {
        field: String,
        value: String,
        expected: String,
    },

    /// A required rating exceeds the largest entry of a standard table
    #[error("Required {required} exceeds the largest standard {table} rating ({maximum})")]
    RangeExceeded {
        table: String,
        required: f64,
        maximum: f64,
    },

    /// Request body could not be parsed at all
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a NonFinite error
    pub fn non_finite(field: impl Into<String>) -> Self {
        CalcError::NonFinite {
            field: field.into(),
        }
    }

    /// Create an UnrecognizedOption error
    pub fn unrecognized_option(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: &[&str],
    ) -> Self {
        CalcError::UnrecognizedOption {
            field: field.into(),
            value: value.into(),
            expected: expected.join(", "),
        }
    }

    /// Create a RangeExceeded error
    pub fn range_exceeded(table: impl Into<String>, required: f64, maximum: f64) -> Self {
        CalcError::RangeExceeded {
            table: table.into(),
            required,
            maximum,
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for failures detected before any computation ran
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::NonFinite { .. }
                | CalcError::UnrecognizedOption { .. }
        )
    }

    /// Name of the offending input field, when the failure has one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::MissingField { field }
            | CalcError::NonFinite { field }
            | CalcError::UnrecognizedOption { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::NonFinite { .. } => "NON_FINITE",
            CalcError::UnrecognizedOption { .. } => "UNRECOGNIZED_OPTION",
            CalcError::RangeExceeded { .. } => "RANGE_EXCEEDED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}
