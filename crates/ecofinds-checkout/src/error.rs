//! # Checkout Error Type
//!
//! Unified error type for the checkout layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in EcoFinds                               │
//! │                                                                         │
//! │  ValidationError ──┐                                                    │
//! │  CoreError ────────┼──► CheckoutError ──► ErrorResponse { code, message }│
//! │  PaymentError ─────┤                                                    │
//! │  MessagingError ───┘                                                    │
//! │                                                                         │
//! │  The front-end switches on `code`, shows `message`.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An unknown coupon never reaches this type: it is a flag on the breakdown.

use ecofinds_core::{CoreError, EcoPoints, ValidationError};
use serde::Serialize;
use thiserror::Error;

use crate::ports::{MessagingError, PaymentError};

/// Checkout failures.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Placing an order needs at least one line item.
    #[error("Cart is empty")]
    EmptyCart,

    /// The customer asked to redeem more points than they hold.
    #[error("Insufficient EcoPoints: available {available}, requested {requested}")]
    InsufficientEcoPoints {
        available: EcoPoints,
        requested: EcoPoints,
    },

    /// Shipping or payment form input was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A cart rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The payment gateway refused or failed the charge.
    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    /// The messaging service could not deliver a chat message.
    #[error("Messaging failed: {0}")]
    Messaging(#[from] MessagingError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Machine-readable error codes for the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Cart operation failed
    CartError,

    /// Not enough EcoPoints for the redemption
    LoyaltyError,

    /// Payment processing error
    PaymentError,

    /// Chat delivery error
    MessagingError,
}

/// What the front-end receives when a checkout call fails.
///
/// ```json
/// { "code": "PAYMENT_ERROR", "message": "Payment failed: card declined" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

impl CheckoutError {
    /// Error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::EmptyCart => ErrorCode::CartError,
            CheckoutError::InsufficientEcoPoints { .. } => ErrorCode::LoyaltyError,
            CheckoutError::Validation(_) => ErrorCode::ValidationError,
            CheckoutError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            CheckoutError::Core(_) => ErrorCode::CartError,
            CheckoutError::Payment(_) => ErrorCode::PaymentError,
            CheckoutError::Messaging(_) => ErrorCode::MessagingError,
        }
    }
}

impl From<&CheckoutError> for ErrorResponse {
    fn from(err: &CheckoutError) -> Self {
        ErrorResponse {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CheckoutError::EmptyCart.code(), ErrorCode::CartError);
        assert_eq!(
            CheckoutError::from(PaymentError::Declined("insufficient funds".to_string())).code(),
            ErrorCode::PaymentError
        );
        assert_eq!(
            CheckoutError::from(CoreError::ItemNotInCart("x".to_string())).code(),
            ErrorCode::CartError
        );
        assert_eq!(
            CheckoutError::from(ValidationError::Required {
                field: "city".to_string()
            })
            .code(),
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let err = CheckoutError::InsufficientEcoPoints {
            available: EcoPoints::new(10),
            requested: EcoPoints::new(30),
        };
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(json["code"], "LOYALTY_ERROR");
        assert_eq!(
            json["message"],
            "Insufficient EcoPoints: available 10 EcoPoints, requested 30 EcoPoints"
        );
    }
}
