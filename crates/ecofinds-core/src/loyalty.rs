//! # EcoPoints
//!
//! The marketplace loyalty currency: earned on every purchase, optionally
//! redeemed for a checkout discount, and shown on the profile as a level
//! with unlockable reward badges.
//!
//! ## Points Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout                                                               │
//! │  ├── redeem: discount = min(subtotal × 10%, balance × ₹10)              │
//! │  │           points used = floor(discount / ₹10)                        │
//! │  └── earn:   floor(subtotal / ₹100) points                              │
//! │                                                                         │
//! │  Profile                                                                │
//! │  ├── level = points / 100 + 1                                           │
//! │  └── badges at 100, 250, 500, 1000 points                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Rate;

/// Points per profile level.
pub const POINTS_PER_LEVEL: u64 = 100;

// =============================================================================
// EcoPoints
// =============================================================================

/// A non-negative EcoPoints balance or amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct EcoPoints(u64);

impl EcoPoints {
    #[inline]
    pub const fn new(points: u64) -> Self {
        EcoPoints(points)
    }

    #[inline]
    pub const fn zero() -> Self {
        EcoPoints(0)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds points, saturating at `u64::MAX`.
    #[inline]
    pub const fn saturating_add(self, other: EcoPoints) -> Self {
        EcoPoints(self.0.saturating_add(other.0))
    }

    /// Subtracts points, returning `None` if the balance would go negative.
    #[inline]
    pub const fn checked_sub(self, other: EcoPoints) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(points) => Some(EcoPoints(points)),
            None => None,
        }
    }
}

impl fmt::Display for EcoPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} EcoPoints", self.0)
    }
}

// =============================================================================
// Loyalty Rules
// =============================================================================

/// Conversion rules between EcoPoints and rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyRules {
    /// Largest share of the subtotal that points may pay for.
    pub redeem_rate: Rate,
    /// Rupee value of one point when redeemed.
    pub point_value: Money,
    /// Subtotal needed to earn one point.
    pub earn_unit: Money,
}

impl Default for LoyaltyRules {
    /// 10% of the subtotal, ₹10 per point, one point per ₹100.
    fn default() -> Self {
        LoyaltyRules {
            redeem_rate: Rate::from_bps(1000),
            point_value: Money::from_rupees(10),
            earn_unit: Money::from_rupees(100),
        }
    }
}

impl LoyaltyRules {
    /// Currency value of a balance.
    pub fn balance_value(&self, balance: EcoPoints) -> Money {
        let paise = i128::from(balance.value()) * i128::from(self.point_value.paise());
        Money::from_paise(paise.min(i128::from(i64::MAX)) as i64)
    }

    /// Discount for redeeming against `subtotal`:
    /// `min(subtotal × redeem_rate, balance value)`.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_core::loyalty::{EcoPoints, LoyaltyRules};
    /// use ecofinds_core::money::Money;
    ///
    /// let rules = LoyaltyRules::default();
    ///
    /// // 10% of ₹3,000 = ₹300, balance worth ₹1,500 → ₹300
    /// let discount = rules.redemption_discount(Money::from_rupees(3000), EcoPoints::new(150));
    /// assert_eq!(discount, Money::from_rupees(300));
    ///
    /// // Balance worth only ₹50 → ₹50
    /// let discount = rules.redemption_discount(Money::from_rupees(3000), EcoPoints::new(5));
    /// assert_eq!(discount, Money::from_rupees(50));
    /// ```
    pub fn redemption_discount(&self, subtotal: Money, balance: EcoPoints) -> Money {
        subtotal
            .clamp_non_negative()
            .apply_rate(self.redeem_rate)
            .min(self.balance_value(balance))
    }

    /// Points consumed by a redemption discount: `floor(discount / point value)`.
    pub fn points_for_discount(&self, discount: Money) -> EcoPoints {
        EcoPoints(discount.whole_units_of(self.point_value))
    }

    /// Points earned by a purchase: one per full `earn_unit` of subtotal.
    pub fn points_earned(&self, subtotal: Money) -> EcoPoints {
        EcoPoints(subtotal.whole_units_of(self.earn_unit))
    }
}

// =============================================================================
// Levels and Rewards
// =============================================================================

/// Profile level derived from a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EcoLevel {
    pub level: u64,
    pub points_to_next_level: u64,
}

impl EcoLevel {
    /// `level = points / 100 + 1`, `to next = level × 100 − points`.
    ///
    /// Saturates for balances near `u64::MAX`.
    pub fn for_balance(balance: EcoPoints) -> Self {
        let level = balance.value() / POINTS_PER_LEVEL + 1;
        EcoLevel {
            level,
            points_to_next_level: level
                .saturating_mul(POINTS_PER_LEVEL)
                .saturating_sub(balance.value()),
        }
    }
}

/// Badges unlocked by accumulating EcoPoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Reward {
    EcoWarriorBadge,
    SustainabilityChampion,
    GreenHero,
    PlanetProtector,
}

impl Reward {
    /// All rewards, cheapest first.
    pub const ALL: [Reward; 4] = [
        Reward::EcoWarriorBadge,
        Reward::SustainabilityChampion,
        Reward::GreenHero,
        Reward::PlanetProtector,
    ];

    /// Points needed to unlock.
    pub const fn threshold(&self) -> EcoPoints {
        match self {
            Reward::EcoWarriorBadge => EcoPoints(100),
            Reward::SustainabilityChampion => EcoPoints(250),
            Reward::GreenHero => EcoPoints(500),
            Reward::PlanetProtector => EcoPoints(1000),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Reward::EcoWarriorBadge => "Eco Warrior Badge",
            Reward::SustainabilityChampion => "Sustainability Champion",
            Reward::GreenHero => "Green Hero",
            Reward::PlanetProtector => "Planet Protector",
        }
    }

    pub fn is_unlocked(&self, balance: EcoPoints) -> bool {
        balance >= self.threshold()
    }
}

/// Rewards unlocked by a balance, cheapest first.
pub fn unlocked_rewards(balance: EcoPoints) -> Vec<Reward> {
    Reward::ALL
        .into_iter()
        .filter(|reward| reward.is_unlocked(balance))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_arithmetic() {
        let balance = EcoPoints::new(150);
        assert_eq!(balance.saturating_add(EcoPoints::new(30)), EcoPoints::new(180));
        assert_eq!(balance.checked_sub(EcoPoints::new(30)), Some(EcoPoints::new(120)));
        assert_eq!(balance.checked_sub(EcoPoints::new(151)), None);
        assert_eq!(balance.to_string(), "150 EcoPoints");
    }

    #[test]
    fn test_balance_value() {
        let rules = LoyaltyRules::default();
        assert_eq!(rules.balance_value(EcoPoints::new(250)), Money::from_rupees(2500));
    }

    #[test]
    fn test_redemption_capped_by_subtotal_share() {
        let rules = LoyaltyRules::default();
        let discount = rules.redemption_discount(Money::from_rupees(3000), EcoPoints::new(150));
        assert_eq!(discount, Money::from_rupees(300));
        assert_eq!(rules.points_for_discount(discount), EcoPoints::new(30));
    }

    #[test]
    fn test_redemption_capped_by_balance() {
        let rules = LoyaltyRules::default();
        let discount = rules.redemption_discount(Money::from_rupees(3000), EcoPoints::zero());
        assert!(discount.is_zero());
    }

    #[test]
    fn test_points_for_partial_discount_floor() {
        let rules = LoyaltyRules::default();
        // ₹59.90 of discount only consumes 5 whole points
        assert_eq!(
            rules.points_for_discount(Money::from_paise(5990)),
            EcoPoints::new(5)
        );
    }

    #[test]
    fn test_points_earned() {
        let rules = LoyaltyRules::default();
        assert_eq!(rules.points_earned(Money::from_rupees(3099)), EcoPoints::new(30));
        assert_eq!(rules.points_earned(Money::from_rupees(99)), EcoPoints::zero());
    }

    #[test]
    fn test_eco_level() {
        assert_eq!(
            EcoLevel::for_balance(EcoPoints::zero()),
            EcoLevel {
                level: 1,
                points_to_next_level: 100
            }
        );
        assert_eq!(
            EcoLevel::for_balance(EcoPoints::new(250)),
            EcoLevel {
                level: 3,
                points_to_next_level: 50
            }
        );
    }

    #[test]
    fn test_eco_level_saturates_at_max_balance() {
        let level = EcoLevel::for_balance(EcoPoints::new(u64::MAX));
        assert_eq!(level.level, u64::MAX / POINTS_PER_LEVEL + 1);
        assert_eq!(level.points_to_next_level, 0);
    }

    #[test]
    fn test_unlocked_rewards() {
        assert!(unlocked_rewards(EcoPoints::new(99)).is_empty());
        assert_eq!(
            unlocked_rewards(EcoPoints::new(250)),
            vec![Reward::EcoWarriorBadge, Reward::SustainabilityChampion]
        );
        assert_eq!(unlocked_rewards(EcoPoints::new(1000)).len(), 4);
        assert_eq!(Reward::GreenHero.name(), "Green Hero");
    }
}
