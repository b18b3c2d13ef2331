//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Centimes                                     │
//! │    Every amount is an i64 count of the smallest unit.               │
//! │    Dinar prices are whole numbers in practice, but discounts and    │
//! │    percentage maths still need exact sub-unit arithmetic.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use maktaba_core::money::Money;
//!
//! let total = Money::from_centimes(250_000);       // 2500.00 DA
//! let discount = total.percentage(1000);           // 10% = 250.00 DA
//! let final_amount = (total - discount).clamp_non_negative();
//! assert_eq!(final_amount.centimes(), 225_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centimes (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates for discounts/returns
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centimes.
    #[inline]
    pub const fn from_centimes(centimes: i64) -> Self {
        Money(centimes)
    }

    /// Creates a Money value from whole dinars.
    ///
    /// ## Example
    /// ```rust
    /// use maktaba_core::money::Money;
    ///
    /// let price = Money::from_dinars(1200); // 1200.00 DA
    /// assert_eq!(price.centimes(), 120_000);
    /// ```
    #[inline]
    pub const fn from_dinars(dinars: i64) -> Self {
        Money(dinars * 100)
    }

    /// Returns the value in centimes.
    #[inline]
    pub const fn centimes(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dinar portion.
    #[inline]
    pub const fn dinars(&self) -> i64 {
        self.0 / 100
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use maktaba_core::money::Money;
    ///
    /// let unit_price = Money::from_dinars(950);
    /// assert_eq!(unit_price.multiply_quantity(3).dinars(), 2850);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given percentage of this amount, rounded to the nearest
    /// centime.
    ///
    /// ## Arguments
    /// * `bps` - Percentage in basis points (1000 = 10%)
    ///
    /// ## Implementation
    /// Integer math with i128 intermediates to prevent overflow:
    /// `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use maktaba_core::money::Money;
    ///
    /// let total = Money::from_centimes(10_000); // 100.00
    /// assert_eq!(total.percentage(1000).centimes(), 1_000); // 10%
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_centimes(part as i64)
    }

    /// Clamps negative amounts to zero.
    ///
    /// Used for the final order amount, which never goes below zero even
    /// when discounts exceed the item total.
    #[inline]
    pub const fn clamp_non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// For debugging and logs; UI formatting/localization happens elsewhere.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} DA",
            sign,
            self.dinars().abs(),
            (self.0 % 100).abs()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Final Amount Derivation
// =============================================================================

/// Computes the final amount of an order:
/// `total - fixed discount - percentage discount + delivery`, clamped at 0.
///
/// Free-delivery orders pass `Money::zero()` for `delivery`.
///
/// ## Example
/// ```rust
/// use maktaba_core::money::{compute_final_amount, Money};
///
/// let final_amount = compute_final_amount(
///     Money::from_dinars(3000), // items
///     Money::from_dinars(200),  // fixed discount
///     500,                      // 5% discount
///     Money::from_dinars(600),  // delivery
/// );
/// assert_eq!(final_amount.dinars(), 3250);
/// ```
pub fn compute_final_amount(
    total: Money,
    fixed_discount: Money,
    discount_bps: u32,
    delivery: Money,
) -> Money {
    let pct_discount = total.percentage(discount_bps);
    (total - fixed_discount - pct_discount + delivery).clamp_non_negative()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centimes() {
        let money = Money::from_centimes(120_050);
        assert_eq!(money.centimes(), 120_050);
        assert_eq!(money.dinars(), 1200);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centimes(120_050)), "1200.50 DA");
        assert_eq!(format!("{}", Money::from_dinars(500)), "500.00 DA");
        assert_eq!(format!("{}", Money::from_centimes(-550)), "-5.50 DA");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centimes(1000);
        let b = Money::from_centimes(500);

        assert_eq!((a + b).centimes(), 1500);
        assert_eq!((a - b).centimes(), 500);
        assert_eq!((a * 3).centimes(), 3000);
    }

    #[test]
    fn test_percentage() {
        let total = Money::from_centimes(10_000);
        assert_eq!(total.percentage(1000).centimes(), 1000); // 10%
        assert_eq!(total.percentage(0).centimes(), 0);
        // 8.25% of 10.00 = 0.825 → rounds to 0.83
        assert_eq!(Money::from_centimes(1000).percentage(825).centimes(), 83);
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_centimes(-100).clamp_non_negative().centimes(), 0);
        assert_eq!(Money::from_centimes(100).clamp_non_negative().centimes(), 100);
    }

    #[test]
    fn test_final_amount_basic() {
        // 3000 items - 200 fixed - 5% (150) + 600 delivery = 3250
        let f = compute_final_amount(
            Money::from_dinars(3000),
            Money::from_dinars(200),
            500,
            Money::from_dinars(600),
        );
        assert_eq!(f.dinars(), 3250);
    }

    #[test]
    fn test_final_amount_clamps_at_zero() {
        // Discounts larger than the total never produce a negative bill.
        let f = compute_final_amount(
            Money::from_dinars(100),
            Money::from_dinars(500),
            0,
            Money::zero(),
        );
        assert_eq!(f, Money::zero());
    }

    #[test]
    fn test_final_amount_free_delivery() {
        let f = compute_final_amount(
            Money::from_dinars(1000),
            Money::zero(),
            0,
            Money::zero(),
        );
        assert_eq!(f.dinars(), 1000);
    }
}
