//! Error types for the controller crate.

use std::fmt;

/// Result type for controller configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A tuning value is outside its valid range.
    InvalidTuning {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTuning {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} ({value}): {reason}"),
        }
    }
}

impl std::error::Error for Error {}

/// Check that a value is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32> {
    if !value.is_finite() {
        return Err(Error::InvalidTuning {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(Error::InvalidTuning {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

/// Check that a value lies in [0, 1].
pub(crate) fn unit_interval(field: &'static str, value: f32) -> Result<f32> {
    let value = non_negative(field, value)?;
    if value > 1.0 {
        return Err(Error::InvalidTuning {
            field,
            value,
            reason: "must be between 0 and 1",
        });
    }
    Ok(value)
}
