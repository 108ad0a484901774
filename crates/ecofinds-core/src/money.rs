//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The old web cart computed GST as `subtotal * 0.12` on floats:          │
//! │    ₹0.1 + ₹0.2 = ₹0.30000000000000004                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    Every amount is an i64 count of paise, every rate is basis points    │
//! │    and every rounding step is explicit.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecofinds_core::money::Money;
//!
//! let price = Money::from_rupees(500);      // ₹500.00
//! let line = price.multiply_quantity(2);    // ₹1000.00
//! assert_eq!(line.paise(), 100_000);
//! assert_eq!(line.to_string(), "₹1000.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

/// Number of paise in one rupee.
pub const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise, the smallest INR unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are subtracted before the final clamp, so
///   intermediate values may dip below zero
/// - **Single field tuple struct**: serializes as a bare JSON number
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.unit_price ──► line total ──► Cart subtotal                   │
/// │                                              │                          │
/// │               ┌──────────────┬───────────────┼───────────────┐          │
/// │               ▼              ▼               ▼               ▼          │
/// │           shipping          GST        coupon discount  EcoPoints       │
/// │               └──────────────┴───────┬───────┴───────────────┘          │
/// │                                      ▼                                  │
/// │                            PriceBreakdown.total                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// let price = Money::from_paise(29_950); // ₹299.50
    /// assert_eq!(price.paise(), 29_950);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(1500).paise(), 150_000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * PAISE_PER_RUPEE)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated towards zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
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

    /// Clamps negative values to zero.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(-250).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_paise(250).clamp_non_negative().paise(), 250);
    /// ```
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Applies a rate and rounds half up to the nearest paisa.
    ///
    /// Used for GST, coupon percentages and the EcoPoints redemption cap.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    /// use ecofinds_core::types::Rate;
    ///
    /// let subtotal = Money::from_rupees(300);
    /// let gst = subtotal.apply_rate(Rate::from_bps(1200)); // 12%
    /// assert_eq!(gst, Money::from_rupees(36));
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 keeps large carts from overflowing during the multiply
        let paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(29_900);
    /// assert_eq!(unit_price.multiply_quantity(3).paise(), 89_700);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns how many whole `unit`s fit into this amount.
    ///
    /// Zero or negative units, and negative amounts, yield zero. Used to turn
    /// rupee amounts into EcoPoints.
    pub fn whole_units_of(&self, unit: Money) -> u64 {
        if unit.0 <= 0 || self.0 <= 0 {
            return 0;
        }
        (self.0 / unit.0) as u64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `₹1234.50`. Grouping and localisation belong to the front-end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
