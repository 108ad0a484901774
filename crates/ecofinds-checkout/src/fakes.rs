//! # Deterministic Port Fakes
//!
//! Stand-ins for the payment gateway and messaging service. No delays, no
//! randomness: the same calls always produce the same results.

use std::cell::{Cell, RefCell};

use crate::ports::{
    ChatMessage, MessagingError, MessagingPort, PaymentError, PaymentGateway, PaymentReceipt,
    PaymentRequest,
};

/// Seller replies, served in order and then repeated.
pub const SELLER_REPLIES: [&str; 5] = [
    "That sounds reasonable! Let me check and get back to you.",
    "Sure, I can share more photos. When would you like to inspect it?",
    "I'm available for pickup this weekend. Would that work for you?",
    "The item has been well-maintained. I can provide the purchase receipt too.",
    "Thanks for your interest! Let me know if you have any other questions.",
];

// =============================================================================
// Payment Fakes
// =============================================================================

/// Approves every charge and records it.
///
/// References are `PAY-000001`, `PAY-000002`, ... per gateway instance.
#[derive(Debug, Default)]
pub struct ApprovingGateway {
    next: Cell<u32>,
    charges: RefCell<Vec<PaymentRequest>>,
}

impl ApprovingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges seen so far, oldest first.
    pub fn charges(&self) -> Vec<PaymentRequest> {
        self.charges.borrow().clone()
    }
}

impl PaymentGateway for ApprovingGateway {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        let n = self.next.get() + 1;
        self.next.set(n);
        self.charges.borrow_mut().push(request.clone());

        Ok(PaymentReceipt {
            reference: format!("PAY-{n:06}"),
            amount: request.amount,
        })
    }
}

/// Declines every charge with a fixed reason.
#[derive(Debug, Clone)]
pub struct DecliningGateway {
    reason: String,
}

impl DecliningGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        DecliningGateway {
            reason: reason.into(),
        }
    }
}

impl PaymentGateway for DecliningGateway {
    fn charge(&self, _request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        Err(PaymentError::Declined(self.reason.clone()))
    }
}

// =============================================================================
// Messaging Fakes
// =============================================================================

/// Answers every message with the next canned seller reply.
#[derive(Debug, Default)]
pub struct CannedReplies {
    next: Cell<usize>,
}

impl CannedReplies {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessagingPort for CannedReplies {
    fn send(&self, message: &ChatMessage) -> Result<Option<ChatMessage>, MessagingError> {
        let index = self.next.get();
        self.next.set((index + 1) % SELLER_REPLIES.len());

        let text = SELLER_REPLIES.get(index).copied().unwrap_or_default();
        Ok(Some(ChatMessage {
            sender_id: message.recipient_id.clone(),
            recipient_id: message.sender_id.clone(),
            text: text.to_string(),
            sent_at: message.sent_at,
        }))
    }
}

/// Fails every delivery.
#[derive(Debug, Default)]
pub struct OfflineMessaging;

impl MessagingPort for OfflineMessaging {
    fn send(&self, message: &ChatMessage) -> Result<Option<ChatMessage>, MessagingError> {
        Err(MessagingError::Unreachable(message.recipient_id.clone()))
    }
}
