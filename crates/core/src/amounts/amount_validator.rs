//! Amount validation run before any balance mutation is submitted.

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::errors::ValidationError;

/// A finite amount strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositiveAmount(Decimal);

impl PositiveAmount {
    /// Parses operator input such as `"10.5"` or `"1e3"`.
    ///
    /// Syntax and sign are judged on the `f64` reading, so any finite
    /// positive number is accepted here and only then narrowed to a `Decimal`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed.parse().map_err(|_| ValidationError::NotANumber)?;
        check_finite_positive(value)?;
        let decimal = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
            .or_else(|| Decimal::from_f64(value));
        Self::narrow(decimal)
    }

    pub fn from_decimal(value: Decimal) -> Result<Self, ValidationError> {
        if value <= Decimal::ZERO {
            return Err(ValidationError::NonPositive);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    /// A positive number that has no non-zero `Decimal` form is out of range.
    fn narrow(decimal: Option<Decimal>) -> Result<Self, ValidationError> {
        match decimal {
            Some(d) if d > Decimal::ZERO => Ok(Self(d)),
            _ => Err(ValidationError::OutOfRange),
        }
    }
}

fn check_finite_positive(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive);
    }
    Ok(())
}

impl TryFrom<f64> for PositiveAmount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        check_finite_positive(value)?;
        Self::narrow(Decimal::from_f64(value))
    }
}

/// Validates a raw amount string typed or keyed in by the operator.
pub fn validate_amount(raw: &str) -> Result<PositiveAmount, ValidationError> {
    PositiveAmount::parse(raw)
}

/// Validates an amount that is already numeric.
pub fn validate_value(value: f64) -> Result<PositiveAmount, ValidationError> {
    PositiveAmount::try_from(value)
}
