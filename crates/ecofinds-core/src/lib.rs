//! # ecofinds-core: Pure Pricing Logic for EcoFinds
//!
//! This crate is the **heart** of the EcoFinds marketplace checkout. It holds
//! the cart rules and the order total calculator as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        EcoFinds Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web front-end                                │   │
//! │  │    Listings ──► Cart ──► Checkout ──► Order confirmation        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    ecofinds-checkout                            │   │
//! │  │    StoreConfig, CheckoutService, PaymentGateway, MessagingPort  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ecofinds-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  money  │ │  cart   │ │ coupon  │ │ loyalty │ │ pricing │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type in integer paise
//! - [`types`] - Rates and line items
//! - [`cart`] - The cart and its quantity rules
//! - [`coupon`] - Coupon table and outcomes
//! - [`loyalty`] - EcoPoints redemption, earning, levels and rewards
//! - [`pricing`] - The order total calculator
//! - [`validation`] - Boundary validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ecofinds_core::{calculate, Cart, LineItem, Money, PriceModifiers, PricingConfig};
//!
//! let mut cart = Cart::new();
//! cart.add_item(LineItem::new("bamboo-bottle", Money::from_rupees(599), 2)).unwrap();
//!
//! let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());
//! assert_eq!(breakdown.subtotal, Money::from_rupees(1198));
//! assert!(breakdown.is_free_shipping());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod loyalty;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use coupon::{CouponOutcome, CouponRule, CouponTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use loyalty::{EcoLevel, EcoPoints, LoyaltyRules, Reward};
pub use money::Money;
pub use pricing::{calculate, PriceBreakdown, PriceModifiers, PricingConfig};
pub use types::{LineItem, Rate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Smallest quantity a cart row can hold; going below removes the row.
pub const MIN_ITEM_QUANTITY: u32 = 1;

/// Largest quantity a cart row can hold (the quantity input's `max`).
pub const MAX_ITEM_QUANTITY: u32 = 99;

/// Largest accepted unit price: ₹1 crore, in paise.
///
/// A full cart at this price and quantity (100 × 99 × 10⁹) stays far inside
/// `i64`, so line totals and the subtotal cannot overflow.
pub const MAX_UNIT_PRICE_PAISE: i64 = 1_000_000_000;
