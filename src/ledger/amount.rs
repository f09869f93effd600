use std::fmt;

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::errors::ReasonCode;

/// A strictly positive monetary quantity.
///
/// Backed by a [`Decimal`] so repeated aggregation never drifts the way
/// binary floating point does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Returns `None` unless `value > 0`.
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    /// Converts caller input into an amount, reporting why it was refused.
    pub fn from_raw(raw: RawAmount) -> Result<Self, ReasonCode> {
        match raw {
            RawAmount::Exact(value) => Self::new(value).ok_or(ReasonCode::NonPositiveAmount),
            RawAmount::Float(value) => {
                if value.is_nan() || value <= 0.0 {
                    return Err(ReasonCode::NonPositiveAmount);
                }
                if value.is_infinite() {
                    return Err(ReasonCode::AmountOutOfRange);
                }
                Decimal::from_f64(value)
                    .and_then(Self::new)
                    .ok_or(ReasonCode::AmountOutOfRange)
            }
        }
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ReasonCode;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ReasonCode::NonPositiveAmount)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Amount exactly as the caller supplied it, before validation.
///
/// Form inputs usually arrive as floats; values already held as decimals
/// (for instance when an update re-checks a stored record) stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Exact(Decimal),
    Float(f64),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Float(value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Exact(value)
    }
}

impl From<Amount> for RawAmount {
    fn from(value: Amount) -> Self {
        RawAmount::Exact(value.value())
    }
}
