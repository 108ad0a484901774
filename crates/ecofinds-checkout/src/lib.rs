//! # ecofinds-checkout: Checkout Orchestration for EcoFinds
//!
//! The thin layer between the web front-end and `ecofinds-core`. It loads
//! store configuration, validates checkout forms, talks to payment and
//! messaging services through ports, and keeps EcoPoints balances in step
//! with placed orders.
//!
//! ## Module Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ecofinds-checkout                                │
//! │                                                                         │
//! │  config ──► StoreConfig (ECOFINDS_* env, pricing profile)               │
//! │  session ─► Customer (id, name, EcoPoints)                              │
//! │                                                                         │
//! │  checkout ─► CheckoutService::quote / place_order ──► order::Order      │
//! │                     │                                   │               │
//! │                     ▼                                   ▼               │
//! │  ports ───► PaymentGateway, MessagingPort     order::OrderHistory       │
//! │                     ▲                                                   │
//! │  fakes ─────────────┘ (ApprovingGateway, CannedReplies, ...)            │
//! │                                                                         │
//! │  chat ────► ChatThread, ChatService                                     │
//! │  telemetry ► init_tracing                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use ecofinds_checkout::fakes::ApprovingGateway;
//! use ecofinds_checkout::{
//!     CheckoutRequest, CheckoutService, Customer, PaymentDetails, ShippingDetails, StoreConfig,
//! };
//! use ecofinds_core::{Cart, LineItem, Money};
//!
//! let service = CheckoutService::new(StoreConfig::default(), ApprovingGateway::new());
//! let mut customer = Customer::new("user-1", "Asha Rao");
//! let mut cart = Cart::new();
//! cart.add_item(LineItem::new("bamboo-bottle", Money::from_rupees(599), 2)).unwrap();
//!
//! let shipping = ShippingDetails {
//!     full_name: "Asha Rao".into(),
//!     phone: "9876543210".into(),
//!     address: "12 MG Road".into(),
//!     city: "Bengaluru".into(),
//!     state: "Karnataka".into(),
//!     pincode: "560001".into(),
//! };
//! let request = CheckoutRequest::new(shipping, PaymentDetails::CashOnDelivery);
//!
//! let order = service.place_order(&mut customer, &mut cart, &request).unwrap();
//! assert!(cart.is_empty());
//! assert_eq!(customer.eco_points.value(), 11);
//! # let _ = order;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod chat;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fakes;
pub mod order;
pub mod ports;
pub mod session;
pub mod telemetry;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use chat::{ChatService, ChatThread};
pub use checkout::{CheckoutRequest, CheckoutService};
pub use config::{ConfigError, PricingProfile, StoreConfig};
pub use error::{CheckoutError, CheckoutResult, ErrorCode, ErrorResponse};
pub use order::{
    EcoImpact, Order, OrderHistory, OrderStatus, PaymentDetails, PaymentMethod, ShippingDetails,
};
pub use ports::{
    ChatMessage, MessagingError, MessagingPort, PaymentError, PaymentGateway, PaymentReceipt,
    PaymentRequest,
};
pub use session::Customer;
pub use telemetry::init_tracing;
