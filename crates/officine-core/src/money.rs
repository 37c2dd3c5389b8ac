//! # Money Module
//!
//! Monetary amounts and reimbursement rates.
//!
//! ## Why f64 Money Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  REIMBURSEMENT ARITHMETIC IS PERCENTAGE ARITHMETIC                      │
//! │                                                                         │
//! │  reimbursed = total × rate / 100                                        │
//! │                                                                         │
//! │  59.90 × 70 / 100 = 41.93      (exact in 2 decimals)                   │
//! │  59.90 × 33 / 100 = 19.767     (NOT exact in 2 decimals)               │
//! │                                                                         │
//! │  The stored value is the UNROUNDED IEEE-754 double. Rounding to two    │
//! │  decimals is display-layer cosmetics, never part of the stored state.  │
//! │  Integer-cents money would force a rounding rule the domain does not   │
//! │  define, so NaN/∞ are rejected at the boundary instead and equality    │
//! │  checks go through an explicit tolerance.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use officine_core::money::{Amount, Rate};
//!
//! let unit_price = Amount::new(5.99).unwrap();
//! let total = unit_price.mul_quantity(10);          // 59.90
//! let rate = Rate::new(70.0).unwrap();
//! let reimbursed = total.apply_rate(rate);          // 41.93 (unrounded)
//!
//! assert!(reimbursed.approx_eq(Amount::new(41.93).unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Tolerance for monetary comparisons (well below a hundredth of a cent).
pub const MONEY_EPSILON: f64 = 1e-6;

// =============================================================================
// Amount
// =============================================================================

/// A non-negative monetary amount in euros.
///
/// ## Design Decisions
/// - **f64**: the domain stores unrounded percentage results (see module docs)
/// - **Validated at birth**: NaN, ±∞, and negatives never enter the type
/// - **Single field tuple struct**: zero-cost abstraction over f64
///
/// Subtraction is provided for `total − reimbursed` style math; the
/// transaction engine guarantees `0 ≤ reimbursed ≤ total` before any
/// subtraction happens.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(f64);

impl Amount {
    /// Creates an amount, rejecting NaN, infinities, and negative values.
    pub fn new(value: f64) -> ValidationResult<Self> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "amount".to_string(),
            });
        }
        if value < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "amount".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        Ok(Amount(value))
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw (unrounded) value in euros.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the amount is zero (within tolerance).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.abs() <= MONEY_EPSILON
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use officine_core::money::Amount;
    ///
    /// let line_total = Amount::new(5.99).unwrap().mul_quantity(10);
    /// assert!(line_total.approx_eq(Amount::new(59.90).unwrap()));
    /// ```
    #[inline]
    pub fn mul_quantity(self, qty: u32) -> Self {
        Amount(self.0 * qty as f64)
    }

    /// Applies a percentage rate: `amount × rate / 100`, unrounded.
    ///
    /// This is the reimbursement formula. The result is stored as-is;
    /// two-decimal formatting is cosmetic (see [`fmt::Display`]).
    #[inline]
    pub fn apply_rate(self, rate: Rate) -> Self {
        Amount(self.0 * rate.percent() / 100.0)
    }

    /// Compares two amounts within [`MONEY_EPSILON`].
    #[inline]
    pub fn approx_eq(self, other: Amount) -> bool {
        (self.0 - other.0).abs() <= MONEY_EPSILON
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

/// Display rounds to two decimals for human consumption only.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} EUR", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A reimbursement rate as a percentage in [0, 100].
///
/// Frozen into each purchase at construction time; a later change to the
/// insurer's rate never rewrites recorded transactions.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Rate(f64);

impl Rate {
    /// Creates a rate, rejecting NaN/∞ and values outside [0, 100].
    pub fn new(percent: f64) -> ValidationResult<Self> {
        crate::validation::validate_reimbursement_rate(percent).map(Rate)
    }

    /// Returns the rate as a percentage (70.0 = 70%).
    #[inline]
    pub const fn percent(&self) -> f64 {
        self.0
    }

    /// Zero rate (no reimbursement).
    #[inline]
    pub const fn zero() -> Self {
        Rate(0.0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_values() {
        assert!(Amount::new(0.0).is_ok());
        assert!(Amount::new(59.90).is_ok());

        assert!(Amount::new(-0.01).is_err());
        assert!(Amount::new(f64::NAN).is_err());
        assert!(Amount::new(f64::INFINITY).is_err());
        assert!(Amount::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_mul_quantity() {
        let total = Amount::new(5.99).unwrap().mul_quantity(10);
        assert!(total.approx_eq(Amount::new(59.90).unwrap()));
    }

    #[test]
    fn test_apply_rate() {
        let total = Amount::new(59.90).unwrap();
        let reimbursed = total.apply_rate(Rate::new(70.0).unwrap());
        assert!(reimbursed.approx_eq(Amount::new(41.93).unwrap()));

        // Zero rate reimburses nothing.
        assert!(total.apply_rate(Rate::zero()).is_zero());

        // Full rate reimburses everything.
        let full = total.apply_rate(Rate::new(100.0).unwrap());
        assert!(full.approx_eq(total));
    }

    #[test]
    fn test_apply_rate_keeps_unrounded_value() {
        // 59.90 × 33% = 19.767 — three decimals, stored unrounded.
        let reimbursed = Amount::new(59.90)
            .unwrap()
            .apply_rate(Rate::new(33.0).unwrap());
        assert!((reimbursed.value() - 19.767).abs() < MONEY_EPSILON);
        // Display is the only place rounding happens.
        assert_eq!(reimbursed.to_string(), "19.77 EUR");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Amount::new(10.0).unwrap();
        let b = Amount::new(2.5).unwrap();

        assert!((a + b).approx_eq(Amount::new(12.5).unwrap()));
        assert!((a - b).approx_eq(Amount::new(7.5).unwrap()));

        let total: Amount = [a, b, b].into_iter().sum();
        assert!(total.approx_eq(Amount::new(15.0).unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(59.9).unwrap().to_string(), "59.90 EUR");
        assert_eq!(Amount::zero().to_string(), "0.00 EUR");
        assert_eq!(Rate::new(70.0).unwrap().to_string(), "70%");
    }

    #[test]
    fn test_rate_bounds() {
        assert!(Rate::new(0.0).is_ok());
        assert!(Rate::new(100.0).is_ok());
        assert!(Rate::new(100.1).is_err());
        assert!(Rate::new(-1.0).is_err());
        assert!(Rate::new(f64::NAN).is_err());
    }
}
