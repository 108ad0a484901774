//! # Validation Module
//!
//! Input validation for everything that crosses into the pricing engine or
//! the checkout flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web front-end                                                │
//! │  ├── Input masks (card digits, MM/YY expiry, 3-digit CVV)              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Boundary (Rust)                                              │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: prices, quantities, shipping and payment fields      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Assumes sanitized input, only clamps quantities                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecofinds_core::validation::{validate_pincode, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_pincode("560001").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_PAISE, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a line item identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a unit price in paise.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free giveaways)
/// - At most MAX_UNIT_PRICE_PAISE (₹1 crore)
///
/// ## Example
/// ```rust
/// use ecofinds_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(59_900).is_ok());
/// assert!(validate_unit_price(0).is_ok());
/// assert!(validate_unit_price(-100).is_err());
/// assert!(validate_unit_price(i64::MAX).is_err());
/// ```
pub fn validate_unit_price(paise: i64) -> ValidationResult<()> {
    if !(0..=MAX_UNIT_PRICE_PAISE).contains(&paise) {
        return Err(ValidationError::OutOfRange {
            field: "unitPrice".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_PAISE,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (99)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > i64::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: i64::from(MIN_ITEM_QUANTITY),
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates cart size (number of distinct items) before adding another.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates the shape of a coupon code.
///
/// This only checks the code is plausible; whether it is *known* is decided
/// by the coupon table and never fails hard.
///
/// ## Rules
/// - At most 32 characters after trimming
/// - Letters, digits, hyphens and underscores only
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "coupon".to_string(),
            max: 32,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "coupon".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Form Validators
// =============================================================================

/// Validates that a text field is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an Indian postal pincode (six digits).
pub fn validate_pincode(pincode: &str) -> ValidationResult<()> {
    validate_required("pincode", pincode)?;
    let pincode = pincode.trim();

    if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pincode".to_string(),
            reason: "must be 6 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an Indian mobile number: 10 digits, optionally prefixed `+91`.
/// Spaces and dashes are ignored.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    validate_required("phone", phone)?;

    let digits: String = phone
        .trim()
        .trim_start_matches("+91")
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must be a 10 digit number".to_string(),
        });
    }

    Ok(())
}

/// Validates a card number. Spaces from the `4242 4242 ...` input mask are ignored.
///
/// ## Rules
/// - 12 to 19 digits
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "cardNumber".to_string(),
        });
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "cardNumber".to_string(),
            reason: "must be 12 to 19 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a card expiry in `MM/YY` form.
pub fn validate_expiry(expiry: &str) -> ValidationResult<()> {
    validate_required("expiryDate", expiry)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "expiryDate".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (month, year) = expiry.trim().split_once('/').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid());
    }

    match month.parse::<u8>() {
        Ok(1..=12) => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates a card CVV (three digits).
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    validate_required("cvv", cvv)?;

    if cvv.len() != 3 || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a UPI id (`name@handle`).
pub fn validate_upi_id(upi_id: &str) -> ValidationResult<()> {
    validate_required("upiId", upi_id)?;

    match upi_id.trim().split_once('@') {
        Some((name, handle)) if !name.is_empty() && !handle.is_empty() && !handle.contains('@') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "upiId".to_string(),
            reason: "must look like name@bank".to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
