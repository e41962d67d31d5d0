//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Fixed-Point Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    65.90 - 16.475 + 4.95 = 54.37500000000001                            │
//! │    Whether that floors to 54.37 depends on luck  ❌                     │
//! │                                                                         │
//! │  Cents alone are not enough either:                                     │
//! │    half of $32.95 = $16.475  → needs a fraction of a cent               │
//! │                                                                         │
//! │  OUR SOLUTION: Ten-thousandths of the major unit                        │
//! │    $32.95  = 329_500 units                                              │
//! │    half    = 164_750 units (exact)                                      │
//! │    total   = 543_750 units → truncate(2) → 543_700 = $54.37             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use basket_core::money::Money;
//!
//! let price = Money::from_cents(3295); // $32.95
//! let discount = price.half();         // $16.475
//! let total = price * 2 - discount;    // $49.425
//!
//! assert_eq!(total.truncate(2), "49.42".parse::<Money>().unwrap());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::MoneyParseError;

/// Number of decimal places carried by every `Money` value.
pub const SCALE_DIGITS: u32 = 4;

/// Internal units per major currency unit (10^SCALE_DIGITS).
pub const UNITS_PER_MAJOR: i64 = 10_000;

/// Internal units per cent.
pub const UNITS_PER_CENT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in ten-thousandths of the major currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtotal minus discounts may be negative in exotic configs
/// - **Four decimal places**: every half-price discount on a cent-priced item is exact
/// - **String serde form**: `"32.95"` in config files, no floats anywhere
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► Basket.subtotal ──┐
///                                     ├──► subtotal - discounts ──► DeliveryRule
/// Offer.apply ────► Basket.discounts ─┘                                 │
///                                                                       ▼
///                     truncate(subtotal - discounts + delivery, 2) = Basket.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money(i64);

impl Money {
    /// The largest representable amount. Used as "unbounded" in amount comparisons.
    pub const MAX: Money = Money(i64::MAX);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * UNITS_PER_CENT)
    }

    /// Creates a Money value from raw ten-thousandth units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(32, 95).cents(), 3295);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money::from_cents(major * 100 - minor)
        } else {
            Money::from_cents(major * 100 + minor)
        }
    }

    /// Returns the raw value in ten-thousandth units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns the value in whole cents, flooring any sub-cent remainder.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let discount = Money::from_cents(3295).half(); // $16.475
    /// assert_eq!(discount.cents(), 1647);
    /// ```
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0.div_euclid(UNITS_PER_CENT)
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / UNITS_PER_MAJOR
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
        Money(self.0.abs())
    }

    /// Returns half of the amount.
    ///
    /// Exact for any amount with at most three decimal places, which covers
    /// every cent-denominated catalogue price.
    #[inline]
    pub const fn half(&self) -> Self {
        Money(self.0.div_euclid(2))
    }

    /// Returns `bps` basis points of this amount (1000 = 10%).
    ///
    /// Rounds half-up at unit precision: `(units * bps + 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(2495);          // $24.95
    /// let ten_percent = price.percentage(1000);     // $2.495
    /// assert_eq!(ten_percent.units(), 24_950);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large amounts from overflowing before the division
        let units = (self.0 as i128 * bps as i128 + 5000).div_euclid(10_000);
        Money(units as i64)
    }

    /// Floors the amount to `decimals` decimal places.
    ///
    /// Truncation never rounds up: it takes the floor of `amount * 10^decimals`
    /// and scales back. Negative amounts move toward negative infinity.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let amount: Money = "54.379".parse().unwrap();
    /// assert_eq!(amount.truncate(2), "54.37".parse::<Money>().unwrap());
    ///
    /// let amount: Money = "54.3789".parse().unwrap();
    /// assert_eq!(amount.truncate(3), "54.378".parse::<Money>().unwrap());
    /// ```
    pub const fn truncate(&self, decimals: u32) -> Money {
        if decimals >= SCALE_DIGITS {
            return *self;
        }
        let factor = 10_i64.pow(SCALE_DIGITS - decimals);
        Money(self.0.div_euclid(factor) * factor)
    }

    /// Absolute value in cents, rounded half away from zero. Display only.
    fn display_cents_abs(&self) -> u64 {
        (self.0.unsigned_abs() + UNITS_PER_CENT as u64 / 2) / UNITS_PER_CENT as u64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to cents, e.g. `$16.48` or `-$5.50`.
///
/// ## Note
/// Only for presentation. Pricing math never goes through this.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.display_cents_abs();
        let sign = if self.0 < 0 && cents > 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, cents / 100, cents % 100)
    }
}

/// Parses plain decimal strings: `"32.95"`, `"-5.5"`, `"7"`, `"54.3789"`.
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(MoneyParseError::NotANumber(s.to_string()));
        }
        if frac.len() > SCALE_DIGITS as usize {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let overflow = || MoneyParseError::Overflow(s.to_string());
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_units: i64 = if frac.is_empty() {
            0
        } else {
            let padding = 10_i64.pow(SCALE_DIGITS - frac.len() as u32);
            frac.parse::<i64>().map_err(|_| overflow())? * padding
        };

        let units = whole
            .checked_mul(UNITS_PER_MAJOR)
            .and_then(|u| u.checked_add(frac_units))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -units } else { units }))
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Exact decimal form used for serialization, e.g. `"16.475"`.
impl From<Money> for String {
    fn from(money: Money) -> Self {
        let sign = if money.0 < 0 { "-" } else { "" };
        let abs = money.0.unsigned_abs();
        let whole = abs / UNITS_PER_MAJOR as u64;
        let frac = abs % UNITS_PER_MAJOR as u64;

        let mut frac = format!("{:04}", frac);
        while frac.len() > 2 && frac.ends_with('0') {
            frac.pop();
        }
        format!("{}{}.{}", sign, whole, frac)
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

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

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
