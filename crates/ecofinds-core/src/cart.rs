//! # Cart
//!
//! The shopping cart: a set of line items unique by identifier.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Front-end Action         Method                  Cart Change           │
//! │  ────────────────         ──────                  ───────────           │
//! │                                                                         │
//! │  Add to cart ────────────► add_item() ──────────► push or merge qty    │
//! │                                                                         │
//! │  Type a quantity ────────► set_quantity() ──────► clamp to 1..=99      │
//! │                                                                         │
//! │  Click − / + ────────────► adjust_quantity() ───► qty ± 1, 0 removes   │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► row removed          │
//! │                                                                         │
//! │  Clear cart ─────────────► clear() ─────────────► empty                │
//! │                                                                         │
//! │  Every mutation is followed by a fresh `pricing::calculate`.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialized Shape
//! A cart serializes as a bare JSON array of line items. Deserializing goes
//! through the same validation as [`Cart::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{clamp_quantity, LineItem};
use crate::validation::{
    validate_cart_size, validate_item_id, validate_quantity, validate_unit_price,
};
use crate::MAX_CART_ITEMS;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same id increases quantity)
/// - Every quantity is within `1..=99`; reaching zero removes the row
/// - Maximum distinct items: 100
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartRow>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Parses and validates a serialized cart.
    ///
    /// ## Rules
    /// - Blank ids, negative prices and non-positive quantities are rejected
    /// - Quantities above 99 are clamped
    /// - Rows sharing an id are merged
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::cart::Cart;
    ///
    /// let cart = Cart::from_json(r#"[{"id":"mat","unitPrice":120000,"quantity":2}]"#).unwrap();
    /// assert_eq!(cart.total_quantity(), 2);
    ///
    /// assert!(Cart::from_json(r#"[{"id":"mat","unitPrice":-1,"quantity":2}]"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let rows: Vec<CartRow> = serde_json::from_str(text)?;
        Cart::try_from(rows)
    }

    /// Serializes the cart as a JSON array.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Adds an item, or merges its quantity into the existing row.
    ///
    /// ## Behavior
    /// - Same id already in cart: quantities add up, clamped at 99. The
    ///   original unit price is kept.
    /// - New id: added as a new row, unless the cart already holds 100 items
    /// - Unit prices outside `0..=MAX_UNIT_PRICE_PAISE` are rejected
    pub fn add_item(&mut self, item: LineItem) -> CoreResult<()> {
        validate_unit_price(item.unit_price.paise())?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity =
                clamp_quantity(i64::from(existing.quantity) + i64::from(item.quantity));
            return Ok(());
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        })?;

        let quantity = clamp_quantity(i64::from(item.quantity));
        self.items.push(LineItem { quantity, ..item });
        Ok(())
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the item, returns `None`
    /// - otherwise clamps to `1..=99` and returns the stored quantity
    /// - unknown id: `CoreError::ItemNotInCart`
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<Option<u32>> {
        let index = self.position(id)?;

        if quantity <= 0 {
            self.items.remove(index);
            return Ok(None);
        }

        let clamped = clamp_quantity(quantity);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = clamped;
        }
        Ok(Some(clamped))
    }

    /// Changes the quantity of an item by `delta` (the − / + buttons).
    ///
    /// A result of zero or below removes the row instead of leaving a
    /// zero-quantity line; anything above 99 is clamped.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::cart::Cart;
    /// use ecofinds_core::money::Money;
    /// use ecofinds_core::types::LineItem;
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(LineItem::new("lamp", Money::from_rupees(300), 1)).unwrap();
    ///
    /// assert_eq!(cart.adjust_quantity("lamp", -1).unwrap(), None);
    /// assert!(cart.is_empty());
    /// ```
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) -> CoreResult<Option<u32>> {
        let index = self.position(id)?;
        let current = self
            .items
            .get(index)
            .map_or(0, |item| i64::from(item.quantity));
        self.set_quantity(id, current.saturating_add(delta))
    }

    /// Removes an item from the cart by id and returns it.
    pub fn remove_item(&mut self, id: &str) -> CoreResult<LineItem> {
        let index = self.position(id)?;
        Ok(self.items.remove(index))
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of distinct items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Σ(unit price × quantity) over all line items.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// EcoPoints attributed to the listings in the cart.
    pub fn total_eco_points(&self) -> u64 {
        self.items.iter().map(LineItem::line_eco_points).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: &str) -> CoreResult<usize> {
        self.items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CoreError::ItemNotInCart(id.to_string()))
    }
}

// =============================================================================
// Serialized Rows
// =============================================================================

/// A cart row as it arrives from the front-end, before validation.
///
/// Numbers are kept signed so negative input is caught by validation
/// instead of surfacing as an opaque parse error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    id: String,
    #[serde(default)]
    title: Option<String>,
    unit_price: i64,
    quantity: i64,
    #[serde(default)]
    eco_points: u32,
}

impl TryFrom<Vec<CartRow>> for Cart {
    type Error = CoreError;

    fn try_from(rows: Vec<CartRow>) -> CoreResult<Self> {
        let mut cart = Cart::new();

        for row in rows {
            validate_item_id(&row.id)?;
            validate_unit_price(row.unit_price)?;
            // Above the maximum is clamped below, not rejected.
            match validate_quantity(row.quantity) {
                Ok(()) | Err(ValidationError::OutOfRange { .. }) => {}
                Err(err) => return Err(err.into()),
            }

            cart.add_item(LineItem {
                id: row.id.trim().to_string(),
                title: row.title,
                unit_price: Money::from_paise(row.unit_price),
                quantity: clamp_quantity(row.quantity),
                eco_points: row.eco_points,
            })?;
        }

        Ok(cart)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
