//! # Domain Types
//!
//! Core value types shared by the cart, coupon, loyalty and pricing modules.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    LineItem     │   │      Rate       │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  id             │   │  bps (u32)      │                              │
//! │  │  unit_price     │   │  1200 = 12% GST │                              │
//! │  │  quantity 1..99 │   │  1000 = ECO10   │                              │
//! │  │  eco_points     │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% (GST on the web checkout), 1000 bps = 10% (ECO10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in a cart with its quantity.
///
/// ## Serialized Shape
/// ```json
/// { "id": "bamboo-bottle", "unitPrice": 59900, "quantity": 2 }
/// ```
/// `title` and `ecoPoints` are optional and default to empty / zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Identifier, unique within the cart.
    pub id: String,

    /// Display title (listing name at the time it was added).
    #[serde(default)]
    pub title: Option<String>,

    /// Price of one unit, in paise.
    pub unit_price: Money,

    /// Units in the cart, always within `1..=99` once inside a [`Cart`](crate::cart::Cart).
    pub quantity: u32,

    /// EcoPoints attributed to one unit of this listing.
    #[serde(default)]
    pub eco_points: u32,
}

impl LineItem {
    /// Creates a line item; quantity is clamped into the allowed range.
    pub fn new(id: impl Into<String>, unit_price: Money, quantity: u32) -> Self {
        LineItem {
            id: id.into(),
            title: None,
            unit_price,
            quantity: clamp_quantity(i64::from(quantity)),
            eco_points: 0,
        }
    }

    /// Sets the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the per-unit EcoPoints value.
    pub fn with_eco_points(mut self, eco_points: u32) -> Self {
        self.eco_points = eco_points;
        self
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// EcoPoints for the whole line (per-unit points × quantity).
    #[inline]
    pub fn line_eco_points(&self) -> u64 {
        u64::from(self.eco_points) * u64::from(self.quantity)
    }
}

/// Clamps a requested quantity into `MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY`.
///
/// ```rust
/// use ecofinds_core::types::clamp_quantity;
///
/// assert_eq!(clamp_quantity(0), 1);
/// assert_eq!(clamp_quantity(42), 42);
/// assert_eq!(clamp_quantity(150), 99);
/// ```
pub fn clamp_quantity(requested: i64) -> u32 {
    requested.clamp(i64::from(MIN_ITEM_QUANTITY), i64::from(MAX_ITEM_QUANTITY)) as u32
}

// =============================================================================
// Unit Tests
// =============================================================================
