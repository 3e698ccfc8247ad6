//! Value objects: equality by value, not identity.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" a
/// value object, create a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative, finite amount (stock on hand, recipe requirement, units to produce).
///
/// Construction is the validation boundary for numeric input: negative, NaN and
/// infinite values are rejected, so everything downstream can assume
/// well-formed numbers. No rounding is applied here.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Quantity(f64);

impl ValueObject for Quantity {}

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!(
                "quantity must be a finite number (got {value})"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative (got {value})"
            )));
        }
        // Normalize -0.0 so equality/serialization never sees a signed zero.
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// `max(0, self - other)`.
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        if self.0 > other.0 {
            Quantity(self.0 - other.0)
        } else {
            Quantity::ZERO
        }
    }

    /// Sum, clamped to `f64::MAX` so the result stays finite.
    pub fn saturating_add(self, other: Quantity) -> Quantity {
        Quantity((self.0 + other.0).min(f64::MAX))
    }

    /// Product, clamped to `f64::MAX` so the result stays finite.
    pub fn saturating_mul(self, other: Quantity) -> Quantity {
        Quantity((self.0 * other.0).min(f64::MAX))
    }

    /// Display helper. Never feed the result back into comparisons.
    pub fn rounded(self, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (self.0 * factor).round() / factor
    }
}

impl TryFrom<f64> for Quantity {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for f64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
