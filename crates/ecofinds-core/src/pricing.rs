//! # Order Total Calculator
//!
//! Turns a cart plus optional modifiers into a fully itemized price breakdown.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate(cart, modifiers, config)                   │
//! │                                                                         │
//! │  subtotal = Σ(unit price × quantity)                                   │
//! │      │                                                                  │
//! │      ├──► shipping = 0 if subtotal = 0 or subtotal > threshold         │
//! │      │               flat fee otherwise                                 │
//! │      │                                                                  │
//! │      ├──► tax      = subtotal × tax rate                               │
//! │      │                                                                  │
//! │      ├──► coupon   = min(subtotal × coupon rate, cap) | 0 + invalid    │
//! │      │                                                                  │
//! │      ├──► loyalty  = min(subtotal × redeem rate, balance × ₹10) | 0    │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  total = max(subtotal + shipping + tax − coupon − loyalty, 0)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation is pure: the same cart, modifiers and config always give
//! the same breakdown. Nothing here is cached; callers recompute after every
//! cart mutation.
//!
//! ## Example
//! ```rust
//! use ecofinds_core::cart::Cart;
//! use ecofinds_core::money::Money;
//! use ecofinds_core::pricing::{calculate, PriceModifiers, PricingConfig};
//! use ecofinds_core::types::LineItem;
//!
//! let mut cart = Cart::new();
//! cart.add_item(LineItem::new("lamp", Money::from_rupees(300), 1)).unwrap();
//!
//! let breakdown = calculate(&cart, &PriceModifiers::with_coupon("ECO10"), &PricingConfig::default());
//! assert_eq!(breakdown.shipping, Money::from_rupees(100));
//! assert_eq!(breakdown.tax, Money::from_rupees(36));
//! assert_eq!(breakdown.coupon_discount, Money::from_rupees(30));
//! assert_eq!(breakdown.total, Money::from_rupees(406));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::coupon::{CouponOutcome, CouponTable};
use crate::loyalty::{EcoPoints, LoyaltyRules};
use crate::money::Money;
use crate::types::Rate;
use crate::validation::{validate_rate_bps, ValidationResult};
use crate::ValidationError;

// =============================================================================
// Configuration
// =============================================================================

/// Business constants the calculator reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    /// Shipping is free when the subtotal is strictly above this.
    pub free_shipping_threshold: Money,
    /// Flat fee charged otherwise.
    pub shipping_fee: Money,
    pub tax_rate: Rate,
    pub coupons: CouponTable,
    pub loyalty: LoyaltyRules,
}

impl Default for PricingConfig {
    /// Canonical web checkout: free shipping above ₹1,000, else ₹100; 12% GST.
    fn default() -> Self {
        PricingConfig {
            free_shipping_threshold: Money::from_rupees(1000),
            shipping_fee: Money::from_rupees(100),
            tax_rate: Rate::from_bps(1200),
            coupons: CouponTable::default(),
            loyalty: LoyaltyRules::default(),
        }
    }
}

impl PricingConfig {
    /// Quick-cart variant: 18% GST and no shipping charge.
    pub fn gst_18() -> Self {
        PricingConfig {
            shipping_fee: Money::zero(),
            tax_rate: Rate::from_bps(1800),
            ..PricingConfig::default()
        }
    }

    /// Step function of the subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() || subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }

    pub fn tax_for(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.tax_rate)
    }

    /// Checks rates are percentages and amounts are non-negative.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate_bps("taxRate", self.tax_rate.bps())?;
        validate_rate_bps("loyalty.redeemRate", self.loyalty.redeem_rate.bps())?;

        let amounts = [
            ("freeShippingThreshold", self.free_shipping_threshold),
            ("shippingFee", self.shipping_fee),
            ("loyalty.pointValue", self.loyalty.point_value),
            ("loyalty.earnUnit", self.loyalty.earn_unit),
        ];
        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    min: 0,
                    max: i64::MAX,
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Modifiers
// =============================================================================

/// Optional inputs that reduce the price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceModifiers {
    /// Customer-entered coupon code, as typed.
    #[serde(default)]
    pub coupon_code: Option<String>,
    /// `Some(balance)` when the customer ticked "Use EcoPoints".
    #[serde(default)]
    pub redeem_eco_points: Option<EcoPoints>,
}

impl PriceModifiers {
    pub fn none() -> Self {
        PriceModifiers::default()
    }

    pub fn with_coupon(code: impl Into<String>) -> Self {
        PriceModifiers {
            coupon_code: Some(code.into()),
            ..PriceModifiers::default()
        }
    }

    /// Requests redemption against an available balance.
    pub fn redeeming(mut self, balance: EcoPoints) -> Self {
        self.redeem_eco_points = Some(balance);
        self
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Itemized result of a price calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub coupon_discount: Money,
    pub loyalty_discount: Money,
    pub total: Money,
    /// What happened to the entered coupon code.
    pub coupon: CouponOutcome,
    /// True when a code was entered but is unknown.
    pub coupon_invalid: bool,
    /// Points consumed by `loyalty_discount`.
    pub eco_points_redeemed: EcoPoints,
    /// Points this purchase earns.
    pub eco_points_earned: EcoPoints,
}

impl PriceBreakdown {
    /// Sum of coupon and loyalty discounts.
    pub fn total_discount(&self) -> Money {
        self.coupon_discount + self.loyalty_discount
    }

    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices a cart.
///
/// Quantities are already clamped by [`Cart`]; no other input is defended
/// against here. An unknown coupon only sets `coupon_invalid`.
pub fn calculate(cart: &Cart, modifiers: &PriceModifiers, config: &PricingConfig) -> PriceBreakdown {
    let subtotal = cart.subtotal();
    let shipping = config.shipping_for(subtotal);
    let tax = config.tax_for(subtotal);

    let coupon = modifiers
        .coupon_code
        .as_deref()
        .map_or(CouponOutcome::None, |code| {
            config.coupons.evaluate(code, subtotal)
        });
    let coupon_discount = coupon.discount();

    let loyalty_discount = modifiers
        .redeem_eco_points
        .map_or(Money::zero(), |balance| {
            config.loyalty.redemption_discount(subtotal, balance)
        });

    let total = (subtotal + shipping + tax - coupon_discount - loyalty_discount).clamp_non_negative();

    PriceBreakdown {
        subtotal,
        shipping,
        tax,
        coupon_discount,
        loyalty_discount,
        total,
        coupon_invalid: coupon.is_invalid(),
        coupon,
        eco_points_redeemed: config.loyalty.points_for_discount(loyalty_discount),
        eco_points_earned: config.loyalty.points_earned(subtotal),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coupon::CouponRule;
    use crate::types::LineItem;

    fn cart_of(lines: &[(&str, i64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (id, rupees, qty) in lines {
            cart.add_item(LineItem::new(*id, Money::from_rupees(*rupees), *qty))
                .unwrap();
        }
        cart
    }

    #[test]
    fn test_subtotal_is_sum_of_lines() {
        let cart = cart_of(&[("a", 599, 2), ("b", 1200, 1), ("c", 0, 5)]);
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());
        assert_eq!(breakdown.subtotal, Money::from_rupees(2398));
    }

    #[test]
    fn test_at_threshold_pays_flat_shipping() {
        // ₹500 × 2 = ₹1000 is not above the threshold
        let cart = cart_of(&[("a", 500, 2)]);
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());

        assert_eq!(breakdown.subtotal, Money::from_rupees(1000));
        assert_eq!(breakdown.shipping, Money::from_rupees(100));
        assert_eq!(breakdown.tax, Money::from_rupees(120));
        assert_eq!(breakdown.total, Money::from_rupees(1220));
    }

    #[test]
    fn test_above_threshold_ships_free() {
        let mut cart = Cart::new();
        cart.add_item(LineItem::new("a", Money::from_paise(100_001), 1))
            .unwrap();
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());

        assert!(breakdown.is_free_shipping());
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let breakdown = calculate(&Cart::new(), &PriceModifiers::none(), &PricingConfig::default());

        assert!(breakdown.subtotal.is_zero());
        assert!(breakdown.shipping.is_zero());
        assert!(breakdown.tax.is_zero());
        assert!(breakdown.total.is_zero());
    }

    #[test]
    fn test_eco10_example() {
        let cart = cart_of(&[("a", 300, 1)]);
        let breakdown = calculate(
            &cart,
            &PriceModifiers::with_coupon("ECO10"),
            &PricingConfig::default(),
        );

        assert_eq!(breakdown.subtotal, Money::from_rupees(300));
        assert_eq!(breakdown.shipping, Money::from_rupees(100));
        assert_eq!(breakdown.coupon_discount, Money::from_rupees(30));
        assert_eq!(breakdown.tax, Money::from_rupees(36));
        assert_eq!(breakdown.total, Money::from_rupees(406));
        assert!(!breakdown.coupon_invalid);
    }

    #[test]
    fn test_unknown_coupon_is_flagged() {
        let cart = cart_of(&[("a", 300, 1)]);
        let breakdown = calculate(
            &cart,
            &PriceModifiers::with_coupon("BOGUS"),
            &PricingConfig::default(),
        );

        assert!(breakdown.coupon_invalid);
        assert!(breakdown.coupon_discount.is_zero());
        assert_eq!(breakdown.total, Money::from_rupees(436));
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let cart = cart_of(&[("a", 2999, 3)]);
        let modifiers = PriceModifiers::with_coupon("eco10").redeeming(EcoPoints::new(40));
        let config = PricingConfig::default();

        assert_eq!(
            calculate(&cart, &modifiers, &config),
            calculate(&cart, &modifiers, &config)
        );
    }

    #[test]
    fn test_loyalty_redemption() {
        let cart = cart_of(&[("laptop", 3000, 1)]);
        let breakdown = calculate(
            &cart,
            &PriceModifiers::none().redeeming(EcoPoints::new(150)),
            &PricingConfig::default(),
        );

        assert_eq!(breakdown.loyalty_discount, Money::from_rupees(300));
        assert_eq!(breakdown.eco_points_redeemed, EcoPoints::new(30));
        assert_eq!(breakdown.eco_points_earned, EcoPoints::new(30));
        // 3000 + 0 shipping + 360 GST − 300
        assert_eq!(breakdown.total, Money::from_rupees(3060));
    }

    #[test]
    fn test_loyalty_not_requested_means_no_discount() {
        let cart = cart_of(&[("laptop", 3000, 1)]);
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());

        assert!(breakdown.loyalty_discount.is_zero());
        assert!(breakdown.eco_points_redeemed.is_zero());
    }

    #[test]
    fn test_total_never_negative() {
        let config = PricingConfig {
            tax_rate: Rate::zero(),
            coupons: CouponTable::empty().with_rule(
                "ALLFREE",
                CouponRule {
                    label: "100% off".to_string(),
                    rate: Rate::from_bps(10000),
                    cap: Money::from_rupees(1_000_000),
                },
            ),
            loyalty: LoyaltyRules {
                redeem_rate: Rate::from_bps(10000),
                ..LoyaltyRules::default()
            },
            ..PricingConfig::default()
        };
        let cart = cart_of(&[("a", 5000, 1)]);
        let breakdown = calculate(
            &cart,
            &PriceModifiers::with_coupon("ALLFREE").redeeming(EcoPoints::new(10_000)),
            &config,
        );

        assert_eq!(breakdown.total_discount(), Money::from_rupees(10_000));
        assert!(breakdown.total.is_zero());
    }

    #[test]
    fn test_gst_18_variant() {
        let cart = cart_of(&[("a", 500, 1)]);
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::gst_18());

        assert!(breakdown.shipping.is_zero());
        assert_eq!(breakdown.tax, Money::from_rupees(90));
        assert_eq!(breakdown.total, Money::from_rupees(590));
    }

    #[test]
    fn test_shipping_step_function() {
        let config = PricingConfig::default();
        for paise in [0, 1, 50_000, 100_000, 100_001, 1_000_000] {
            let subtotal = Money::from_paise(paise);
            let expected = if paise == 0 || paise > 100_000 {
                Money::zero()
            } else {
                config.shipping_fee
            };
            assert_eq!(config.shipping_for(subtotal), expected, "subtotal {paise}");
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(PricingConfig::default().validate().is_ok());

        let bad_rate = PricingConfig {
            tax_rate: Rate::from_bps(20_000),
            ..PricingConfig::default()
        };
        assert!(bad_rate.validate().is_err());

        let bad_fee = PricingConfig {
            shipping_fee: Money::from_paise(-1),
            ..PricingConfig::default()
        };
        assert!(bad_fee.validate().is_err());
    }

    #[test]
    fn test_breakdown_serializes_camel_case() {
        let cart = cart_of(&[("a", 300, 1)]);
        let breakdown = calculate(&cart, &PriceModifiers::none(), &PricingConfig::default());
        let json = serde_json::to_value(&breakdown).unwrap();

        assert_eq!(json["subtotal"], 30000);
        assert_eq!(json["couponDiscount"], 0);
        assert_eq!(json["couponInvalid"], false);
        assert_eq!(json["coupon"]["status"], "none");
    }
}
