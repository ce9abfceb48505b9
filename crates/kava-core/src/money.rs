//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Hryvnia                                          │
//! │    The shop prices everything in whole hryvnia (грн), so the minor     │
//! │    unit IS the major unit. All math is i64, rounding is explicit.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kava_core::money::Money;
//!
//! // Create from whole hryvnia (the only constructor)
//! let price = Money::from_uah(1250);
//!
//! // Localized display with thousands separators
//! assert_eq!(price.to_string(), "1 250 грн");
//!
//! // Round-trip law: parse(format(x)) == x
//! assert_eq!(Money::parse("1 250 грн").unwrap(), price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ParseError;
use crate::types::DiscountRate;

/// The currency suffix appended by [`Money`]'s display form and stripped by
/// [`Money::parse`].
pub const CURRENCY_SUFFIX: &str = "грн";

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in whole hryvnia.
///
/// ## Design Decisions
/// - **i64**: Plenty of headroom for any cart total this shop will see
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Non-negative by construction in domain use**: prices come from the
///   catalog, totals from sums and clamped discounts
///
/// ## Where Money Flows
/// ```text
/// Product.unit_price ──► LineItem.unit_price ──► LineItem.line_total()
///        │
///        └──► Displayed as "1 250 грн" in the UI
///
/// items_subtotal ──► discount ──► delivery ──► grand_total
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole hryvnia.
    #[inline]
    pub const fn from_uah(uah: i64) -> Self {
        Money(uah)
    }

    /// Returns the value in whole hryvnia.
    #[inline]
    pub const fn uah(&self) -> i64 {
        self.0
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

    /// Parses user-facing price text into a Money value.
    ///
    /// Strips the `грн` suffix, whitespace (including non-breaking spaces),
    /// and thousands separators (`,` and `'`), then reads the remaining
    /// digits.
    ///
    /// ## Failure Modes
    /// - [`ParseError::NoDigits`] - nothing numeric left after stripping
    /// - [`ParseError::UnexpectedCharacter`] - stray letters or signs
    /// - [`ParseError::OutOfRange`] - value does not fit in i64
    ///
    /// UI callers treat any failure as "price 0" but must not feed the
    /// failure itself into totals.
    ///
    /// ## Example
    /// ```rust
    /// use kava_core::money::Money;
    ///
    /// assert_eq!(Money::parse("1 250 грн").unwrap(), Money::from_uah(1250));
    /// assert_eq!(Money::parse("  725"), Ok(Money::from_uah(725)));
    /// assert!(Money::parse("грн").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Money, ParseError> {
        let trimmed = text.trim();
        let body = trimmed.strip_suffix(CURRENCY_SUFFIX).unwrap_or(trimmed);

        let mut digits = String::new();
        for c in body.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c.is_whitespace() || c == ',' || c == '\'' {
                // Thousands separators carry no value.
                continue;
            } else {
                return Err(ParseError::UnexpectedCharacter {
                    input: text.to_string(),
                    found: c,
                });
            }
        }

        if digits.is_empty() {
            return Err(ParseError::NoDigits {
                input: text.to_string(),
            });
        }

        digits
            .parse::<i64>()
            .map(Money)
            .map_err(|_| ParseError::OutOfRange {
                input: text.to_string(),
            })
    }

    /// Renders the value as localized currency text.
    ///
    /// Digits are grouped in threes with regular spaces, suffixed with
    /// `грн`. Equivalent to the `Display` impl; exists for call sites that
    /// want the intent spelled out.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Computes a percentage share of this amount with round-half-up
    /// semantics.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides the half-up rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use kava_core::money::Money;
    /// use kava_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_uah(250);
    /// let rate = DiscountRate::from_bps(1000); // 10%
    ///
    /// assert_eq!(subtotal.percentage(rate), Money::from_uah(25));
    /// ```
    pub fn percentage(&self, rate: DiscountRate) -> Money {
        // i128 prevents overflow on large amounts
        let share = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_uah(share as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation renders the localized currency form.
///
/// This IS the UI format: `parse` and `Display` obey the round-trip law
/// `parse(format(x)) == x` for all non-negative x.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(c);
        }
        write!(f, "{} {}", grouped, CURRENCY_SUFFIX)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uah() {
        let money = Money::from_uah(1250);
        assert_eq!(money.uah(), 1250);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Money::from_uah(0).to_string(), "0 грн");
        assert_eq!(Money::from_uah(725).to_string(), "725 грн");
        assert_eq!(Money::from_uah(1250).to_string(), "1 250 грн");
        assert_eq!(Money::from_uah(1_234_567).to_string(), "1 234 567 грн");
    }

    #[test]
    fn test_parse_strips_suffix_and_separators() {
        assert_eq!(Money::parse("250 грн"), Ok(Money::from_uah(250)));
        assert_eq!(Money::parse("  1 250 грн  "), Ok(Money::from_uah(1250)));
        assert_eq!(Money::parse("1,234,567"), Ok(Money::from_uah(1_234_567)));
        assert_eq!(Money::parse("1'000"), Ok(Money::from_uah(1000)));
        assert_eq!(Money::parse("725"), Ok(Money::from_uah(725)));
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(matches!(
            Money::parse("грн"),
            Err(ParseError::NoDigits { .. })
        ));
        assert!(matches!(Money::parse(""), Err(ParseError::NoDigits { .. })));
        assert!(matches!(
            Money::parse("abc"),
            Err(ParseError::UnexpectedCharacter { .. })
        ));
        assert!(matches!(
            Money::parse("-50"),
            Err(ParseError::UnexpectedCharacter { found: '-', .. })
        ));
    }

    #[test]
    fn test_parse_format_round_trip() {
        for uah in [0, 1, 9, 99, 100, 999, 1000, 54321, 1_234_567, 987_654_321] {
            let money = Money::from_uah(uah);
            assert_eq!(Money::parse(&money.format()), Ok(money), "uah = {uah}");
        }
    }

    #[test]
    fn test_percentage_half_up_rounding() {
        // 250 × 10% = 25 exactly
        assert_eq!(
            Money::from_uah(250).percentage(DiscountRate::from_bps(1000)),
            Money::from_uah(25)
        );
        // 5 × 10% = 0.5 → rounds up to 1
        assert_eq!(
            Money::from_uah(5).percentage(DiscountRate::from_bps(1000)),
            Money::from_uah(1)
        );
        // 4 × 10% = 0.4 → rounds down to 0
        assert_eq!(
            Money::from_uah(4).percentage(DiscountRate::from_bps(1000)),
            Money::zero()
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_uah(1000);
        let b = Money::from_uah(500);

        assert_eq!((a + b).uah(), 1500);
        assert_eq!((a - b).uah(), 500);
        assert_eq!((a * 3u32).uah(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.uah(), 500);
    }
}
