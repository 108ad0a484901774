//! # Orders
//!
//! Checkout input (shipping and payment details), the placed `Order`, and the
//! customer's `OrderHistory`.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order ──► Confirmed ──► InTransit ──► Delivered                  │
//! │                      │                                                  │
//! │                      └──────► Cancelled                                 │
//! │                                                                         │
//! │  Processing is used for cash-on-delivery orders awaiting dispatch.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use ecofinds_core::validation::{
    validate_card_number, validate_cvv, validate_expiry, validate_phone, validate_pincode,
    validate_required, validate_upi_id, ValidationResult,
};
use ecofinds_core::{EcoPoints, LineItem, Money, PriceBreakdown};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Shipping
// =============================================================================

/// Where the order goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub pincode: String,
}

impl ShippingDetails {
    /// Name, address and city are required. Phone and pincode must be well formed.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required("fullName", &self.full_name)?;
        validate_phone(&self.phone)?;
        validate_required("address", &self.address)?;
        validate_required("city", &self.city)?;
        validate_pincode(&self.pincode)?;
        Ok(())
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Upi,
    /// Paid to the courier; nothing is charged at checkout.
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Whether checkout must charge the gateway.
    pub const fn is_prepaid(&self) -> bool {
        !matches!(self, PaymentMethod::CashOnDelivery)
    }
}

/// Payment form contents, tagged by method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentDetails {
    #[serde(rename_all = "camelCase")]
    Card {
        card_number: String,
        expiry_date: String,
        cvv: String,
        cardholder_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Upi { upi_id: String },
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentDetails::Card { .. } => PaymentMethod::Card,
            PaymentDetails::Upi { .. } => PaymentMethod::Upi,
            PaymentDetails::CashOnDelivery => PaymentMethod::CashOnDelivery,
        }
    }

    /// Field checks per method; cash on delivery needs nothing.
    pub fn validate(&self) -> ValidationResult<()> {
        match self {
            PaymentDetails::Card {
                card_number,
                expiry_date,
                cvv,
                cardholder_name,
            } => {
                validate_card_number(card_number)?;
                validate_expiry(expiry_date)?;
                validate_cvv(cvv)?;
                validate_required("cardholderName", cardholder_name)
            }
            PaymentDetails::Upi { upi_id } => validate_upi_id(upi_id),
            PaymentDetails::CashOnDelivery => Ok(()),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    InTransit,
    Delivered,
    Cancelled,
}

/// A placed order. Items and breakdown are frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_id: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub breakdown: PriceBreakdown,
    pub payment_method: PaymentMethod,
    /// Gateway reference; `None` for cash on delivery and zero totals.
    pub payment_reference: Option<String>,
    pub shipping: ShippingDetails,
    pub status: OrderStatus,
}

impl Order {
    pub fn total(&self) -> Money {
        self.breakdown.total
    }

    pub fn eco_points_earned(&self) -> EcoPoints {
        self.breakdown.eco_points_earned
    }

    /// Per-order badge: one kg of CO₂ per ₹500 spent.
    pub fn co2_saved_kg(&self) -> u64 {
        self.total().whole_units_of(Money::from_rupees(500))
    }

    /// Case-insensitive match on item titles and ids.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.items.iter().any(|item| {
            item.id.to_lowercase().contains(&query)
                || item
                    .title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&query))
        })
    }
}

// =============================================================================
// Environmental Impact
// =============================================================================

/// Rough savings from buying second-hand, scaled from rupees spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoImpact {
    /// 1 kg per ₹100
    pub co2_saved_kg: u64,
    /// 1 tree per ₹2,000
    pub trees_saved: u64,
    /// 1 litre per ₹50
    pub water_saved_litres: u64,
    /// 1 kWh per ₹20
    pub energy_saved_kwh: u64,
}

impl EcoImpact {
    pub fn from_spend(spent: Money) -> Self {
        let per = |rupees| spent.whole_units_of(Money::from_rupees(rupees));
        EcoImpact {
            co2_saved_kg: per(100),
            trees_saved: per(2000),
            water_saved_litres: per(50),
            energy_saved_kwh: per(20),
        }
    }
}

// =============================================================================
// Order History
// =============================================================================

/// A customer's past orders, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, order: Order) {
        self.orders.push(order);
    }

    pub fn get(&self, id: Uuid) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    /// Moves an order to a new status. Returns false if the id is unknown.
    pub fn set_status(&mut self, id: Uuid, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|order| order.id == id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders with the given status (all when `None`) whose items match `query`.
    pub fn filter(&self, status: Option<OrderStatus>, query: &str) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| status.map_or(true, |s| order.status == s))
            .filter(|order| order.matches_query(query))
            .collect()
    }

    pub fn total_spent(&self) -> Money {
        self.orders.iter().map(Order::total).sum()
    }

    pub fn impact(&self) -> EcoImpact {
        EcoImpact::from_spend(self.total_spent())
    }

    pub fn total_eco_points_earned(&self) -> EcoPoints {
        self.orders
            .iter()
            .map(Order::eco_points_earned)
            .fold(EcoPoints::zero(), EcoPoints::saturating_add)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecofinds_core::{calculate, Cart, PriceModifiers, PricingConfig};

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            pincode: "560001".to_string(),
        }
    }

    fn order(title: &str, rupees: i64, status: OrderStatus) -> Order {
        let mut cart = Cart::new();
        let item = LineItem::new(title.to_lowercase(), Money::from_rupees(rupees), 1).with_title(title);
        cart.add_item(item).unwrap();
        Order {
            id: Uuid::new_v4(),
            customer_id: "user-1".to_string(),
            placed_at: Utc::now(),
            items: cart.items().to_vec(),
            breakdown: calculate(&cart, &PriceModifiers::none(), &PricingConfig::default()),
            payment_method: PaymentMethod::Upi,
            payment_reference: Some("PAY-000001".to_string()),
            shipping: shipping(),
            status,
        }
    }

    #[test]
    fn test_shipping_validation() {
        assert!(shipping().validate().is_ok());

        let missing_city = ShippingDetails {
            city: "  ".to_string(),
            ..shipping()
        };
        assert!(missing_city.validate().is_err());

        let no_state = ShippingDetails {
            state: String::new(),
            ..shipping()
        };
        assert!(no_state.validate().is_ok());
    }

    #[test]
    fn test_payment_details_validation() {
        let card = PaymentDetails::Card {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
            cardholder_name: "Asha Rao".to_string(),
        };
        assert!(card.validate().is_ok());
        assert_eq!(card.method(), PaymentMethod::Card);

        let blank_holder = PaymentDetails::Card {
            card_number: "4242 4242 4242 4242".to_string(),
            expiry_date: "12/29".to_string(),
            cvv: "123".to_string(),
            cardholder_name: String::new(),
        };
        assert!(blank_holder.validate().is_err());

        assert!(PaymentDetails::Upi {
            upi_id: String::new()
        }
        .validate()
        .is_err());
        assert!(PaymentDetails::CashOnDelivery.validate().is_ok());
    }

    #[test]
    fn test_payment_details_json() {
        let details: PaymentDetails =
            serde_json::from_str(r#"{"method":"upi","upiId":"asha@okbank"}"#).unwrap();
        assert_eq!(details.method(), PaymentMethod::Upi);

        let cod: PaymentDetails = serde_json::from_str(r#"{"method":"cod"}"#).unwrap();
        assert!(!cod.method().is_prepaid());
    }

    #[test]
    fn test_history_filters() {
        let mut history = OrderHistory::new();
        history.record(order("Bamboo Bottle", 599, OrderStatus::Delivered));
        history.record(order("Yoga Mat", 1200, OrderStatus::Delivered));
        history.record(order("Used Laptop", 22000, OrderStatus::InTransit));

        assert_eq!(history.filter(None, "").len(), 3);
        assert_eq!(history.filter(Some(OrderStatus::Delivered), "").len(), 2);
        assert_eq!(history.filter(None, "laptop").len(), 1);
        assert!(history
            .filter(Some(OrderStatus::Delivered), "laptop")
            .is_empty());
    }

    #[test]
    fn test_history_totals() {
        let mut history = OrderHistory::new();
        history.record(order("Bamboo Bottle", 599, OrderStatus::Delivered));
        history.record(order("Used Laptop", 22000, OrderStatus::Delivered));

        // 599 + 100 shipping + 71.88 GST; 22000 + 2640 GST
        assert_eq!(history.total_spent(), Money::from_paise(77_088 + 2_464_000));
        assert_eq!(history.total_eco_points_earned(), EcoPoints::new(5 + 220));
    }

    #[test]
    fn test_history_impact() {
        let mut history = OrderHistory::new();
        assert_eq!(history.impact(), EcoImpact::default());

        // 22000 + 2640 GST = ₹24,640
        history.record(order("Used Laptop", 22000, OrderStatus::Delivered));
        assert_eq!(
            history.impact(),
            EcoImpact {
                co2_saved_kg: 246,
                trees_saved: 12,
                water_saved_litres: 492,
                energy_saved_kwh: 1232,
            }
        );
        assert_eq!(history.orders()[0].co2_saved_kg(), 49);
    }

    #[test]
    fn test_set_status() {
        let mut history = OrderHistory::new();
        let placed = order("Novel Set", 999, OrderStatus::Confirmed);
        let id = placed.id;
        history.record(placed);

        assert!(history.set_status(id, OrderStatus::Cancelled));
        assert_eq!(history.get(id).map(|o| o.status), Some(OrderStatus::Cancelled));
        assert!(!history.set_status(Uuid::nil(), OrderStatus::Delivered));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::InTransit).unwrap(),
            r#""in-transit""#
        );
    }
}
