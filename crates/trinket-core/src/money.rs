//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog "5.50" ──► 550 cents ──► markup, discounts in i64/i128      │
//! │                                                                         │
//! │  Floats appear only at the edge, when a report averages order totals.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trinket_core::money::Money;
//!
//! let cost = Money::parse_decimal("10,99").unwrap();
//! assert_eq!(cost.cents(), 1099);
//!
//! let total = cost * 2 + Money::from_cents(2);
//! assert_eq!(total.to_string(), "$22.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;
use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: differences of totals may go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a non-negative decimal amount as written in catalog files.
    ///
    /// Accepts `"12"`, `"12.5"`, `"12.50"` and the comma form `"12,50"`.
    /// At most two decimals are allowed.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("5.5").unwrap().cents(), 550);
    /// assert!(Money::parse_decimal("5.555").is_err());
    /// assert!(Money::parse_decimal("-1").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Money, ValidationError> {
        let text = text.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (whole, fraction) = match text.split_once(|c: char| c == '.' || c == ',') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("is not a decimal amount"));
        }
        if fraction.len() > 2 {
            return Err(invalid("has more than two decimals"));
        }

        let major: i64 = whole.parse().map_err(|_| invalid("is too large"))?;
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("is not a decimal amount"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("is not a decimal amount"))?,
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| invalid("is too large"))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Returns the value in major units as a float.
    ///
    /// Only for numeric projections (e.g. averaging order totals); never
    /// feed the result back into pricing.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a major-unit float back to cents, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64_rounded(13.336).cents(), 1334);
    /// assert_eq!(Money::from_major_f64_rounded(13.333333).cents(), 1333);
    /// ```
    pub fn from_major_f64_rounded(major: f64) -> Self {
        Money((major * 100.0).round() as i64)
    }

    /// Applies a rate and returns the resulting share of this amount.
    ///
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 rounds the
    /// half cent up.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::money::Money;
    /// use trinket_core::types::Rate;
    ///
    /// let cost = Money::from_cents(1000); // $10.00
    /// let markup = cost.apply_rate(Rate::from_bps(825)); // 8.25%
    /// assert_eq!(markup.cents(), 83); // $0.825 rounds to $0.83
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 so large amounts cannot overflow; saturate on the way back
        let share = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        let cents = i64::try_from(share).unwrap_or(if share < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1500 = 15%)
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// let discounted = subtotal.apply_percentage_discount(1500);
    /// assert_eq!(discounted.cents(), 8500); // $85.00
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount = self.apply_rate(Rate::from_bps(discount_bps));
        Money::from_cents(self.0 - discount.cents())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a `$` sign, for logs and debugging.
///
/// The console formats amounts through its configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
