//! # Checkout Service
//!
//! Quotes carts and turns them into orders.
//!
//! ## Place Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cart not empty?                    ── no ──► EmptyCart              │
//! │  2. Shipping + payment details valid?  ── no ──► Validation             │
//! │  3. Redemption within balance?         ── no ──► InsufficientEcoPoints  │
//! │  4. calculate(cart, modifiers, pricing)                                 │
//! │  5. Prepaid and total > 0?  ──► PaymentGateway::charge ── err ──► Payment│
//! │  6. Balance -= redeemed, balance += earned                              │
//! │  7. Snapshot items, clear cart, return Order                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-5 leave the customer and cart untouched on failure.

use chrono::Utc;
use ecofinds_core::validation::{validate_coupon_code, ValidationResult};
use ecofinds_core::{calculate, Cart, EcoPoints, PriceBreakdown, PriceModifiers};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::order::{Order, OrderStatus, PaymentDetails, ShippingDetails};
use crate::ports::{PaymentGateway, PaymentRequest};
use crate::session::Customer;

/// Everything the checkout form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping: ShippingDetails,
    pub payment: PaymentDetails,
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// Points the customer offers for redemption.
    #[serde(default)]
    pub redeem_eco_points: Option<EcoPoints>,
}

impl CheckoutRequest {
    pub fn new(shipping: ShippingDetails, payment: PaymentDetails) -> Self {
        CheckoutRequest {
            shipping,
            payment,
            coupon_code: None,
            redeem_eco_points: None,
        }
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupon_code = Some(code.into());
        self
    }

    pub fn redeeming(mut self, points: u64) -> Self {
        self.redeem_eco_points = Some(EcoPoints::new(points));
        self
    }

    /// Form checks: shipping, payment, and the shape of any coupon code.
    ///
    /// A well-formed but unknown code passes; the calculator flags it.
    pub fn validate(&self) -> ValidationResult<()> {
        self.shipping.validate()?;
        self.payment.validate()?;
        if let Some(code) = &self.coupon_code {
            validate_coupon_code(code)?;
        }
        Ok(())
    }

    fn modifiers(&self) -> PriceModifiers {
        PriceModifiers {
            coupon_code: self.coupon_code.clone(),
            redeem_eco_points: self.redeem_eco_points.filter(|points| !points.is_zero()),
        }
    }
}

/// Prices carts and places orders against a payment gateway.
#[derive(Debug)]
pub struct CheckoutService<G> {
    config: StoreConfig,
    gateway: G,
}

impl<G: PaymentGateway> CheckoutService<G> {
    pub fn new(config: StoreConfig, gateway: G) -> Self {
        CheckoutService { config, gateway }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Prices a cart without side effects.
    pub fn quote(&self, cart: &Cart, modifiers: &PriceModifiers) -> PriceBreakdown {
        let breakdown = calculate(cart, modifiers, &self.config.pricing);

        debug!(
            items = cart.item_count(),
            subtotal = %breakdown.subtotal,
            total = %breakdown.total,
            "Cart quoted"
        );

        breakdown
    }

    /// Places an order for everything in `cart`.
    ///
    /// On success the cart is emptied and the customer's EcoPoints balance
    /// reflects both redeemed and earned points.
    pub fn place_order(
        &self,
        customer: &mut Customer,
        cart: &mut Cart,
        request: &CheckoutRequest,
    ) -> CheckoutResult<Order> {
        debug!(customer_id = %customer.id, items = cart.item_count(), "place_order");

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        request.validate()?;

        let modifiers = request.modifiers();
        if let Some(requested) = modifiers.redeem_eco_points {
            if requested > customer.eco_points {
                return Err(CheckoutError::InsufficientEcoPoints {
                    available: customer.eco_points,
                    requested,
                });
            }
        }

        let breakdown = calculate(cart, &modifiers, &self.config.pricing);
        if breakdown.coupon_invalid {
            warn!(code = ?breakdown.coupon.code(), "Unknown coupon ignored");
        }

        let remaining = customer
            .eco_points
            .checked_sub(breakdown.eco_points_redeemed)
            .ok_or(CheckoutError::InsufficientEcoPoints {
                available: customer.eco_points,
                requested: breakdown.eco_points_redeemed,
            })?;

        let order_id = Uuid::new_v4();
        let payment_method = request.payment.method();

        let payment_reference = if payment_method.is_prepaid() && breakdown.total.is_positive() {
            let receipt = self.gateway.charge(&PaymentRequest {
                order_id,
                customer_id: customer.id.clone(),
                amount: breakdown.total,
                method: payment_method,
            })?;
            info!(order_id = %order_id, reference = %receipt.reference, amount = %receipt.amount, "Payment captured");
            Some(receipt.reference)
        } else {
            None
        };

        customer.eco_points = remaining.saturating_add(breakdown.eco_points_earned);

        let items = cart.items().to_vec();
        cart.clear();

        let status = if payment_method.is_prepaid() {
            OrderStatus::Confirmed
        } else {
            OrderStatus::Processing
        };

        info!(
            order_id = %order_id,
            total = %breakdown.total,
            items = items.len(),
            redeemed = breakdown.eco_points_redeemed.value(),
            earned = breakdown.eco_points_earned.value(),
            "Order placed"
        );

        Ok(Order {
            id: order_id,
            customer_id: customer.id.clone(),
            placed_at: Utc::now(),
            items,
            breakdown,
            payment_method,
            payment_reference,
            shipping: request.shipping.clone(),
            status,
        })
    }
}
