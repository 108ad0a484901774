//! # Store Configuration
//!
//! Store-wide settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ECOFINDS_*`)
//! 2. Pricing profile named by `ECOFINDS_PRICING_PROFILE`
//! 3. Defaults (this file)
//!
//! Configuration is read-only after loading; the checkout service takes it by
//! value.

use std::env;

use ecofinds_core::{Money, PricingConfig, Rate, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Shown in order confirmations
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Calculator constants
    pub pricing: PricingConfig,
}

/// Named pricing presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingProfile {
    /// 12% GST, ₹100 shipping up to ₹1,000
    #[default]
    Standard,

    /// 18% GST, no shipping charge
    Gst18,
}

impl PricingProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "default" => Some(PricingProfile::Standard),
            "gst18" | "gst_18" | "gst-18" => Some(PricingProfile::Gst18),
            _ => None,
        }
    }

    pub fn pricing(&self) -> PricingConfig {
        match self {
            PricingProfile::Standard => PricingConfig::default(),
            PricingProfile::Gst18 => PricingConfig::gst_18(),
        }
    }
}

impl Default for StoreConfig {
    /// Development defaults: "EcoFinds", ₹, standard pricing.
    fn default() -> Self {
        StoreConfig {
            store_name: "EcoFinds".to_string(),
            currency_symbol: "₹".to_string(),
            pricing: PricingConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `ECOFINDS_STORE_NAME`: Override store name
    /// - `ECOFINDS_PRICING_PROFILE`: `standard` (default) or `gst18`
    /// - `ECOFINDS_TAX_RATE`: Tax percentage (e.g., "12" or "8.25")
    /// - `ECOFINDS_FREE_SHIPPING_THRESHOLD`: Rupees (e.g., "1000")
    /// - `ECOFINDS_SHIPPING_FEE`: Rupees (e.g., "99.50")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(store_name) = lookup("ECOFINDS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(profile) = lookup("ECOFINDS_PRICING_PROFILE") {
            config.pricing = PricingProfile::parse(&profile)
                .ok_or(ConfigError::UnknownProfile(profile))?
                .pricing();
        }

        if let Some(rate) = lookup("ECOFINDS_TAX_RATE") {
            let bps = parse_hundredths(&rate)
                .and_then(|bps| u32::try_from(bps).ok())
                .ok_or_else(|| ConfigError::InvalidValue("ECOFINDS_TAX_RATE".to_string()))?;
            config.pricing.tax_rate = Rate::from_bps(bps);
        }

        if let Some(threshold) = lookup("ECOFINDS_FREE_SHIPPING_THRESHOLD") {
            config.pricing.free_shipping_threshold =
                parse_rupees("ECOFINDS_FREE_SHIPPING_THRESHOLD", &threshold)?;
        }

        if let Some(fee) = lookup("ECOFINDS_SHIPPING_FEE") {
            config.pricing.shipping_fee = parse_rupees("ECOFINDS_SHIPPING_FEE", &fee)?;
        }

        config.pricing.validate()?;

        Ok(config)
    }

    /// Formats a paise amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use ecofinds_checkout::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(123_450), "₹1234.50");
    /// ```
    pub fn format_currency(&self, paise: i64) -> String {
        let amount = Money::from_paise(paise);
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.rupees().abs(),
            amount.paise_part().abs()
        )
    }
}

fn parse_rupees(key: &str, value: &str) -> Result<Money, ConfigError> {
    parse_hundredths(value)
        .map(Money::from_paise)
        .ok_or_else(|| ConfigError::InvalidValue(key.to_string()))
}

/// Parses a non-negative decimal with at most two fraction digits into
/// hundredths: "12" -> 1200, "8.25" -> 825, "99.5" -> 9950.
fn parse_hundredths(value: &str) -> Option<i64> {
    let value = value.trim();
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));

    if whole.is_empty() || frac.len() > 2 {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(frac)
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Unknown pricing profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store_name, "EcoFinds");
        assert_eq!(config.pricing, PricingConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ECOFINDS_STORE_NAME", "EcoFinds Pune"),
            ("ECOFINDS_TAX_RATE", "8.25"),
            ("ECOFINDS_FREE_SHIPPING_THRESHOLD", "500"),
            ("ECOFINDS_SHIPPING_FEE", "49.5"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "EcoFinds Pune");
        assert_eq!(config.pricing.tax_rate, Rate::from_bps(825));
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_rupees(500));
        assert_eq!(config.pricing.shipping_fee, Money::from_paise(4950));
    }

    #[test]
    fn test_profile_then_override() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("ECOFINDS_PRICING_PROFILE", "gst18"),
            ("ECOFINDS_SHIPPING_FEE", "40"),
        ]))
        .unwrap();

        assert_eq!(config.pricing.tax_rate, Rate::from_bps(1800));
        assert_eq!(config.pricing.shipping_fee, Money::from_rupees(40));
    }

    #[test]
    fn test_invalid_values() {
        let err = StoreConfig::from_lookup(lookup(&[("ECOFINDS_TAX_RATE", "twelve")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "ECOFINDS_TAX_RATE"));

        let err = StoreConfig::from_lookup(lookup(&[("ECOFINDS_SHIPPING_FEE", "-10")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err =
            StoreConfig::from_lookup(lookup(&[("ECOFINDS_PRICING_PROFILE", "vat")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile(_)));
    }

    #[test]
    fn test_tax_rate_above_hundred_percent_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("ECOFINDS_TAX_RATE", "150")])).unwrap_err();
        assert!(matches!(err, ConfigError::Pricing(_)));
    }

    #[test]
    fn test_parse_hundredths() {
        assert_eq!(parse_hundredths("12"), Some(1200));
        assert_eq!(parse_hundredths(" 8.25 "), Some(825));
        assert_eq!(parse_hundredths("0.5"), Some(50));
        assert_eq!(parse_hundredths("1.234"), None);
        assert_eq!(parse_hundredths(".5"), None);
        assert_eq!(parse_hundredths(""), None);
    }

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(123_450), "₹1234.50");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-550), "-₹5.50");
    }
}
