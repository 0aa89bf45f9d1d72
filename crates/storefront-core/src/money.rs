//! # Money Module
//!
//! Provides the `Money` type for handling prices, cart totals and savings.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart total summed over many lines drifts the same way.               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    ₹1,499 is stored as 149900 paise                                     │
//! │    Totals and savings are exact integer sums                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_major(1499);          // ₹1,499
//! let line = price * 2;                          // ₹2,998
//! let original = Money::from_major(1999);
//! assert_eq!((original - price).major(), 500);   // saving per unit
//! assert_eq!(line.minor(), 299_800);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Number of minor units in one major unit (paise per rupee, cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: savings arithmetic may pass through negative values
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serialized as the bare integer, so catalog JSON stays flat
/// - **Saturating**: arithmetic clamps at the `i64` bounds, so cart totals
///   never panic or wrap however large a quantity gets
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price ─────────┬──► CartItem line total ──► Cart total price   │
/// │                         │                                               │
/// │  Product.original_price ┴──► CartItem line saving ──► Cart savings      │
/// │                                                                         │
/// │  ProductQuery price filters and sorts compare Money directly           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (paise, cents).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_minor(149_900);
    /// assert_eq!(price.major(), 1499);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    ///
    /// The static catalog lists whole-rupee prices, so this is the usual
    /// constructor for catalog data.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(1099).minor_part(), 99);
    /// assert_eq!(Money::from_minor(-550).minor_part(), 50);
    /// ```
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_major(299);
    /// assert_eq!(unit_price.multiply_quantity(3).major(), 897);
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Whole-percent discount of `self` relative to `original`.
    ///
    /// Rounds half up. Returns 0 when `original` is not positive or when
    /// `self` is not below it.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major(100);
    /// let original = Money::from_major(150);
    /// assert_eq!(price.percentage_off(original), 33);
    /// ```
    pub fn percentage_off(&self, original: Money) -> u8 {
        if !original.is_positive() || self.0 >= original.0 {
            return 0;
        }

        // i128 so that large catalog prices cannot overflow the * 200
        let saved = (original.0 - self.0.max(0)) as i128;
        let orig = original.0 as i128;
        let pct = (saved * 200 + orig) / (orig * 2);
        pct.min(100) as u8
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain rendering with two fraction digits (`1499.00`).
///
/// ## Note
/// Currency-aware formatting lives in the state crate's configuration,
/// which knows the symbol and how many fraction digits to show.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().unsigned_abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals into a cart total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_and_major() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor_part(), 99);

        assert_eq!(Money::from_major(1499).minor(), 149_900);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_major(5)), "5.00");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_minor(250);
        assert_eq!(c.minor(), 1250);
    }

    #[test]
    fn test_sum() {
        let lines = vec![Money::from_major(10), Money::from_major(20), Money::from_minor(5)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.minor(), 3005);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_minor(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().minor(), 100);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_minor(i64::MAX);
        let min = Money::from_minor(i64::MIN);

        assert_eq!(max + Money::from_minor(1), max);
        assert_eq!(min - Money::from_minor(1), min);
        assert_eq!(Money::from_major(100).multiply_quantity(i64::MAX), max);
        assert_eq!(Money::from_major(-100) * i64::MAX, min);
        assert_eq!(Money::from_major(i64::MAX), max);
        assert_eq!(min.abs(), max);

        let total: Money = vec![max, max, Money::from_major(1)].into_iter().sum();
        assert_eq!(total, max);

        let mut acc = max;
        acc += max;
        assert_eq!(acc, max);
        assert!(!format!("{}", min).is_empty());
    }

    #[test]
    fn test_percentage_off() {
        let original = Money::from_major(150);
        assert_eq!(Money::from_major(100).percentage_off(original), 33);
        assert_eq!(Money::from_major(75).percentage_off(original), 50);
        assert_eq!(Money::from_major(150).percentage_off(original), 0);
        assert_eq!(Money::from_major(200).percentage_off(original), 0);
        assert_eq!(Money::zero().percentage_off(original), 100);
        assert_eq!(Money::from_major(10).percentage_off(Money::zero()), 0);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_major(12)).unwrap();
        assert_eq!(json, "1200");
        let back: Money = serde_json::from_str("1200").unwrap();
        assert_eq!(back, Money::from_major(12));
    }
}
