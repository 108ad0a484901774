//! # Coupons
//!
//! Named discount rules applied to the cart subtotal, subject to a cap.
//!
//! ## Coupon Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  " eco10 " ──► normalize ──► "ECO10" ──► CouponTable                    │
//! │                                              │                          │
//! │                    ┌─────────────────────────┼──────────────────┐       │
//! │                    ▼                         ▼                  ▼       │
//! │              blank code                known code         unknown code  │
//! │           CouponOutcome::None     Applied { discount }   Invalid { code }│
//! │                                 min(subtotal×rate, cap)   discount = 0  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown code never fails the cart: it is tagged `Invalid` so the
//! front-end can show "“CODE” is not valid" and carry on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Rate;

/// The only coupon the marketplace ships with.
pub const ECO10: &str = "ECO10";

// =============================================================================
// Coupon Rule
// =============================================================================

/// Percentage-of-subtotal discount with an absolute cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRule {
    /// Shown next to the applied code, e.g. "10% off (max ₹1,500)".
    pub label: String,
    pub rate: Rate,
    pub cap: Money,
}

impl CouponRule {
    /// Discount this rule grants on a subtotal: `min(subtotal × rate, cap)`.
    pub fn discount_for(&self, subtotal: Money) -> Money {
        subtotal
            .clamp_non_negative()
            .apply_rate(self.rate)
            .min(self.cap)
    }
}

// =============================================================================
// Coupon Table
// =============================================================================

/// Known coupon codes, keyed by their normalized (upper-case) form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponTable {
    rules: BTreeMap<String, CouponRule>,
}

impl CouponTable {
    /// An empty table: every code is invalid.
    pub fn empty() -> Self {
        CouponTable {
            rules: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) a rule under the normalized code.
    pub fn with_rule(mut self, code: &str, rule: CouponRule) -> Self {
        self.rules.insert(normalize_code(code), rule);
        self
    }

    /// Looks up a rule by code, ignoring case and surrounding whitespace.
    pub fn get(&self, code: &str) -> Option<&CouponRule> {
        self.rules.get(&normalize_code(code))
    }

    /// Evaluates a customer-entered code against a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::coupon::{CouponOutcome, CouponTable};
    /// use ecofinds_core::money::Money;
    ///
    /// let table = CouponTable::default();
    ///
    /// let outcome = table.evaluate("eco10", Money::from_rupees(300));
    /// assert_eq!(outcome.discount(), Money::from_rupees(30));
    ///
    /// let outcome = table.evaluate("FREESTUFF", Money::from_rupees(300));
    /// assert!(outcome.is_invalid());
    /// assert!(outcome.discount().is_zero());
    /// ```
    pub fn evaluate(&self, code: &str, subtotal: Money) -> CouponOutcome {
        let code = normalize_code(code);
        if code.is_empty() {
            return CouponOutcome::None;
        }

        match self.rules.get(&code) {
            Some(rule) => CouponOutcome::Applied {
                discount: rule.discount_for(subtotal),
                label: rule.label.clone(),
                code,
            },
            None => CouponOutcome::Invalid { code },
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CouponTable {
    /// `ECO10`: 10% off the subtotal, capped at ₹1,500.
    fn default() -> Self {
        CouponTable::empty().with_rule(
            ECO10,
            CouponRule {
                label: "10% off (max ₹1,500)".to_string(),
                rate: Rate::from_bps(1000),
                cap: Money::from_rupees(1500),
            },
        )
    }
}

/// Trims and upper-cases a code the way the cart page does before lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Coupon Outcome
// =============================================================================

/// Result of evaluating a coupon code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CouponOutcome {
    /// No code was entered.
    #[default]
    None,
    /// The code matched a rule.
    Applied {
        code: String,
        label: String,
        discount: Money,
    },
    /// The code is unknown; the cart keeps working without a discount.
    Invalid { code: String },
}

impl CouponOutcome {
    /// Discount granted, zero unless `Applied`.
    pub fn discount(&self) -> Money {
        match self {
            CouponOutcome::Applied { discount, .. } => *discount,
            CouponOutcome::None | CouponOutcome::Invalid { .. } => Money::zero(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CouponOutcome::Invalid { .. })
    }

    /// The normalized code, if one was entered.
    pub fn code(&self) -> Option<&str> {
        match self {
            CouponOutcome::None => None,
            CouponOutcome::Applied { code, .. } | CouponOutcome::Invalid { code } => Some(code),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eco10_is_ten_percent() {
        let outcome = CouponTable::default().evaluate("ECO10", Money::from_rupees(300));
        assert_eq!(
            outcome,
            CouponOutcome::Applied {
                code: "ECO10".to_string(),
                label: "10% off (max ₹1,500)".to_string(),
                discount: Money::from_rupees(30),
            }
        );
    }

    #[test]
    fn test_eco10_is_capped() {
        // 10% of ₹22,000 would be ₹2,200
        let outcome = CouponTable::default().evaluate("ECO10", Money::from_rupees(22_000));
        assert_eq!(outcome.discount(), Money::from_rupees(1500));
    }

    #[test]
    fn test_code_is_normalized() {
        let outcome = CouponTable::default().evaluate("  eco10 ", Money::from_rupees(100));
        assert_eq!(outcome.code(), Some("ECO10"));
        assert_eq!(outcome.discount(), Money::from_rupees(10));
    }

    #[test]
    fn test_unknown_code_is_invalid_not_fatal() {
        let outcome = CouponTable::default().evaluate("green50", Money::from_rupees(100));
        assert_eq!(
            outcome,
            CouponOutcome::Invalid {
                code: "GREEN50".to_string()
            }
        );
        assert!(outcome.discount().is_zero());
    }

    #[test]
    fn test_blank_code_is_no_coupon() {
        let outcome = CouponTable::default().evaluate("   ", Money::from_rupees(100));
        assert_eq!(outcome, CouponOutcome::None);
        assert_eq!(outcome.code(), None);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let table = CouponTable::default();
        let first = table.evaluate("ECO10", Money::from_paise(123_456));
        let second = table.evaluate("ECO10", Money::from_paise(123_456));
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_rule() {
        let table = CouponTable::empty().with_rule(
            "monsoon",
            CouponRule {
                label: "5% off".to_string(),
                rate: Rate::from_bps(500),
                cap: Money::from_rupees(50),
            },
        );
        assert_eq!(table.len(), 1);
        assert!(table.get("MONSOON").is_some());
        assert!(table.evaluate("ECO10", Money::from_rupees(100)).is_invalid());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&CouponOutcome::Invalid {
            code: "X".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"invalid","code":"X"}"#);
    }
}
