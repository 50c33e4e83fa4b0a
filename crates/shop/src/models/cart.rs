//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hardstop_core::{CartId, CartItemId, Price, ProductId};

/// A cart owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
    /// Unique cart ID. Never reassigned, even when the items are replaced.
    pub id: CartId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
    /// Line items, in request order.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Build a new cart with a fresh ID, stamped now.
    #[must_use]
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            id: CartId::generate(),
            created_at: Utc::now(),
            items,
        }
    }

    /// Sum of every line's quantity times its unit price.
    ///
    /// `None` if the amount does not fit in a decimal.
    #[must_use]
    pub fn total(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    /// Unique item ID.
    pub id: CartItemId,
    /// Number of units.
    pub quantity: u32,
    /// Unit price captured when the line was written.
    pub unit_price: Price,
    /// Product this line refers to.
    pub product_id: ProductId,
}

impl CartItem {
    /// Build an item from a requested line, taking quantity and price verbatim.
    #[must_use]
    pub fn from_line(line: &CartLineInput) -> Self {
        Self {
            id: CartItemId::generate(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            product_id: line.product_id,
        }
    }

    /// Quantity times unit price, or `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.unit_price.times(self.quantity)
    }
}

/// A requested cart line.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLineInput {
    /// Product to buy.
    pub product_id: ProductId,
    /// Number of units.
    pub quantity: u32,
    /// Unit price to record, independent of the product's list price.
    pub unit_price: Price,
}
