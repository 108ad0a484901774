//! # Buyer/Seller Chat
//!
//! A conversation about one listing, delivered through a [`MessagingPort`].

use chrono::Utc;
use ecofinds_core::validation::validate_required;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CheckoutResult;
use crate::ports::{ChatMessage, MessagingPort};

/// Longest message accepted, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// Messages exchanged between a buyer and a seller, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatThread {
    pub buyer_id: String,
    pub seller_id: String,
    /// Listing the conversation is about.
    #[serde(default)]
    pub product_id: Option<String>,
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new(buyer_id: impl Into<String>, seller_id: impl Into<String>) -> Self {
        ChatThread {
            buyer_id: buyer_id.into(),
            seller_id: seller_id.into(),
            product_id: None,
            messages: Vec::new(),
        }
    }

    pub fn about(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a message that arrived outside [`ChatService::send`].
    pub fn receive(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }
}

/// Sends buyer messages and records replies.
#[derive(Debug)]
pub struct ChatService<M> {
    messaging: M,
}

impl<M: MessagingPort> ChatService<M> {
    pub fn new(messaging: M) -> Self {
        ChatService { messaging }
    }

    /// Sends `text` from the buyer to the seller.
    ///
    /// The message is recorded only once delivered. A synchronous reply, if
    /// the transport returns one, is recorded after it and returned.
    pub fn send(&self, thread: &mut ChatThread, text: &str) -> CheckoutResult<Option<ChatMessage>> {
        let text = text.trim();
        validate_required("message", text)?;
        if text.chars().count() > MAX_MESSAGE_LEN {
            return Err(ecofinds_core::ValidationError::TooLong {
                field: "message".to_string(),
                max: MAX_MESSAGE_LEN,
            }
            .into());
        }

        let message = ChatMessage {
            sender_id: thread.buyer_id.clone(),
            recipient_id: thread.seller_id.clone(),
            text: text.to_string(),
            sent_at: Utc::now(),
        };

        let reply = self.messaging.send(&message).map_err(|err| {
            warn!(seller_id = %thread.seller_id, error = %err, "Chat message not delivered");
            err
        })?;

        debug!(seller_id = %thread.seller_id, replied = reply.is_some(), "Chat message sent");

        thread.messages.push(message);
        if let Some(reply) = &reply {
            thread.messages.push(reply.clone());
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CheckoutError, ErrorCode};
    use crate::fakes::{CannedReplies, OfflineMessaging, SELLER_REPLIES};

    #[test]
    fn test_send_records_message_and_reply() {
        let chat = ChatService::new(CannedReplies::new());
        let mut thread = ChatThread::new("buyer-1", "seller-9").about("vintage-camera");

        let reply = chat
            .send(&mut thread, "  Is this still available?  ")
            .unwrap()
            .unwrap();

        assert_eq!(reply.text, SELLER_REPLIES[0]);
        assert_eq!(reply.sender_id, "seller-9");
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.messages()[0].text, "Is this still available?");
        assert_eq!(thread.last_message(), Some(&reply));
    }

    #[test]
    fn test_replies_follow_canned_order() {
        let chat = ChatService::new(CannedReplies::new());
        let mut thread = ChatThread::new("buyer-1", "seller-9");

        chat.send(&mut thread, "Hi").unwrap();
        let second = chat.send(&mut thread, "Can you share photos?").unwrap().unwrap();

        assert_eq!(second.text, SELLER_REPLIES[1]);
        assert_eq!(thread.len(), 4);
    }

    #[test]
    fn test_blank_message_rejected() {
        let chat = ChatService::new(CannedReplies::new());
        let mut thread = ChatThread::new("buyer-1", "seller-9");

        let err = chat.send(&mut thread, "   ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(thread.is_empty());

        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(chat.send(&mut thread, &long).is_err());
    }

    #[test]
    fn test_undelivered_message_not_recorded() {
        let chat = ChatService::new(OfflineMessaging);
        let mut thread = ChatThread::new("buyer-1", "seller-9");

        let err = chat.send(&mut thread, "Hello?").unwrap_err();
        assert!(matches!(err, CheckoutError::Messaging(_)));
        assert!(thread.is_empty());
    }
}
