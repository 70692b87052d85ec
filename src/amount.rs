//! Validated amounts of money.

use serde::{Deserialize, Serialize};

use crate::Error;

/// An amount of money that is strictly greater than zero.
///
/// Transactions, budgets and goal targets are always recorded as positive
/// numbers; whether money is earned or spent is given by the category type.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PositiveAmount(f64);

impl PositiveAmount {
    /// Create a positive amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `amount` is zero, negative or not finite.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::Validation(format!(
                "amount must be greater than zero, got {amount}"
            )))
        }
    }

    /// Create a positive amount without validation.
    ///
    /// The caller should ensure that `amount` is greater than zero, e.g. when
    /// reading a value that was validated before it was stored.
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PositiveAmount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PositiveAmount> for f64 {
    fn from(value: PositiveAmount) -> Self {
        value.0
    }
}

/// An amount of money that is zero or greater, e.g. the savings towards a goal.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NonNegativeAmount(f64);

impl NonNegativeAmount {
    /// Zero dollars.
    pub const ZERO: Self = Self(0.0);

    /// Create a non-negative amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::Validation] if `amount` is negative or not finite.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::Validation(format!(
                "amount must not be negative, got {amount}"
            )))
        }
    }

    /// Create a non-negative amount without validation.
    ///
    /// The caller should ensure that `amount` is not negative.
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a float.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Default for NonNegativeAmount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f64> for NonNegativeAmount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonNegativeAmount> for f64 {
    fn from(value: NonNegativeAmount) -> Self {
        value.0
    }
}
