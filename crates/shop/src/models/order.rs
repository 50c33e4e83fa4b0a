//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hardstop_core::{CartId, OrderId, OrderStatus, PaymentId, Price, UserId};

use super::{Cart, CartLineInput, Payment, PaymentInput};

/// A purchase order.
///
/// The order exclusively owns one cart and one payment; both are stored in
/// their own collections and referenced here by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// When the order was placed.
    pub ordered_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// User who placed the order.
    pub user_id: UserId,
    /// Owned cart.
    pub cart_id: CartId,
    /// Owned payment.
    pub payment_id: PaymentId,
}

/// An order together with its cart and payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,
    pub cart: Cart,
    pub payment: Payment,
}

impl OrderDetails {
    /// Order ID.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.order.id
    }

    /// Cart total at the captured unit prices. `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<Price> {
        self.cart.total()
    }
}

/// Request body for creating or updating an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
    /// When the order was placed.
    pub ordered_at: DateTime<Utc>,
    /// Lifecycle status, as its integer code.
    #[serde(default)]
    pub status: OrderStatus,
    /// Requested cart lines. May be empty.
    #[serde(default)]
    pub items: Vec<CartLineInput>,
    /// Payment details.
    pub payment: PaymentInput,
}
