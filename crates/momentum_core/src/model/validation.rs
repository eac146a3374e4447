//! Optional input checks for domain entities.
//!
//! The store does not run these unless write validation is enabled; UI
//! callers may also use them directly before submitting a form.

use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Entity id is the nil UUID.
    NilId,
    /// A numeric field that must be `>= 0` is negative.
    NegativeValue { field: &'static str, value: f64 },
    /// A numeric field is NaN or infinite.
    NonFiniteValue { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::NegativeValue { field, value } => {
                write!(f, "{field} must be >= 0, got {value}")
            }
            Self::NonFiniteValue { field } => write!(f, "{field} must be a finite number"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn check_id(id: Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::NilId);
    }
    Ok(())
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_non_negative, ValidationError};

    #[test]
    fn non_negative_accepts_zero_and_rejects_nan() {
        assert!(check_non_negative("hours", 0.0).is_ok());
        assert_eq!(
            check_non_negative("hours", f64::NAN),
            Err(ValidationError::NonFiniteValue { field: "hours" })
        );
        assert_eq!(
            check_non_negative("hours", -1.5),
            Err(ValidationError::NegativeValue {
                field: "hours",
                value: -1.5
            })
        );
    }
}
