//! # External Service Ports
//!
//! Payment and seller messaging are external services. The checkout layer
//! only ever talks to them through these traits, so tests (and local
//! development) plug in the deterministic fakes from [`crate::fakes`].
//!
//! ## Port Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService ──► PaymentGateway::charge(PaymentRequest)             │
//! │                           │                                             │
//! │                           ├── Ok(PaymentReceipt { reference })          │
//! │                           └── Err(PaymentError::Declined | Unavailable) │
//! │                                                                         │
//! │  ChatService ──────► MessagingPort::send(ChatMessage)                   │
//! │                           │                                             │
//! │                           ├── Ok(Some(reply)) / Ok(None)                │
//! │                           └── Err(MessagingError)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use ecofinds_core::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::order::PaymentMethod;

// =============================================================================
// Payment
// =============================================================================

/// A charge the checkout asks the gateway to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub customer_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
}

/// Proof that a charge went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    /// Gateway reference (transaction id, UPI ref, ...).
    pub reference: String,
    pub amount: Money,
}

/// Why a charge did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The issuer or bank refused the payment.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The gateway could not be reached or failed internally.
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Charges customers.
pub trait PaymentGateway {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for &G {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        (**self).charge(request)
    }
}

// =============================================================================
// Messaging
// =============================================================================

/// One message in a buyer/seller conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender_id: String,
    pub recipient_id: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Why a chat message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagingError {
    #[error("recipient unreachable: {0}")]
    Unreachable(String),

    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Delivers chat messages. A transport may return the counterpart's reply
/// synchronously; real-time transports return `None` and deliver later.
pub trait MessagingPort {
    fn send(&self, message: &ChatMessage) -> Result<Option<ChatMessage>, MessagingError>;
}

impl<M: MessagingPort + ?Sized> MessagingPort for &M {
    fn send(&self, message: &ChatMessage) -> Result<Option<ChatMessage>, MessagingError> {
        (**self).send(message)
    }
}
