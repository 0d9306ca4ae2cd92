//! Calculation errors shared by every consumer of the core computations

use thiserror::Error;

/// Errors raised by the irrigation calculator and volume conversion.
///
/// These are returned to the immediate caller unchanged; the core never
/// substitutes a default for a required value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero: {field} must be nonzero")]
    DivisionByZero { field: String },

    #[error("Either gallons or acre-feet must be provided")]
    MissingVolume,
}

impl CalculationError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        CalculationError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn division_by_zero(field: &str) -> Self {
        CalculationError::DivisionByZero {
            field: field.to_string(),
        }
    }

    /// Name of the offending field, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            CalculationError::InvalidInput { field, .. } => Some(field),
            CalculationError::DivisionByZero { field } => Some(field),
            CalculationError::MissingVolume => None,
        }
    }
}

pub type CalculationResult<T> = Result<T, CalculationError>;
