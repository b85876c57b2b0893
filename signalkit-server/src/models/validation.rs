//! Validation error types

use thiserror::Error;

/// Validation error for signal input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Field exceeds maximum length
    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Invalid enum variant
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// Numeric field is NaN or infinite
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Integer outside its allowed range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "symbol",
            max: 32,
        };
        assert_eq!(
            err.to_string(),
            "symbol exceeds maximum length of 32 characters"
        );

        let err = ValidationError::InvalidVariant {
            field: "side",
            value: "hold".into(),
        };
        assert_eq!(err.to_string(), "invalid side value: 'hold'");

        let err = ValidationError::OutOfRange {
            field: "limit",
            min: 1,
            max: 500,
            value: 501,
        };
        assert_eq!(err.to_string(), "limit must be between 1 and 500, got 501");
    }
}
