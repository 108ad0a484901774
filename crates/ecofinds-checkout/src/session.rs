//! Signed-in customer context, passed explicitly to every checkout call.

use ecofinds_core::loyalty::unlocked_rewards;
use ecofinds_core::{EcoLevel, EcoPoints, Reward};
use serde::{Deserialize, Serialize};

/// The customer placing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub eco_points: EcoPoints,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
            eco_points: EcoPoints::zero(),
        }
    }

    pub fn with_eco_points(mut self, points: u64) -> Self {
        self.eco_points = EcoPoints::new(points);
        self
    }

    pub fn level(&self) -> EcoLevel {
        EcoLevel::for_balance(self.eco_points)
    }

    pub fn rewards(&self) -> Vec<Reward> {
        unlocked_rewards(self.eco_points)
    }
}
