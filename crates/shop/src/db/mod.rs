//! In-memory record store.
//!
//! # Collections
//!
//! - `users` - Shop users with their favorites and order history
//! - `products` - Catalog products
//! - `categories` - Product categories
//! - `carts` - Carts, each holding its own line items
//! - `payments` - Payments
//! - `orders` - Orders, each owning one cart and one payment
//!
//! No collection checks references into another. Keeping orders, carts and
//! payments consistent is the job of
//! [`OrderService`](crate::services::orders::OrderService).

pub mod collection;

use serde::Serialize;

use hardstop_core::{CartId, CategoryId, OrderId, PaymentId, ProductId, UserId};

use crate::models::{Cart, Category, Order, Payment, Product, User};

pub use collection::{Collection, Record};

macro_rules! impl_record {
    ($model:ty, $id:ty) => {
        impl Record for $model {
            type Id = $id;

            fn id(&self) -> $id {
                self.id
            }
        }
    };
}

impl_record!(User, UserId);
impl_record!(Product, ProductId);
impl_record!(Category, CategoryId);
impl_record!(Cart, CartId);
impl_record!(Payment, PaymentId);
impl_record!(Order, OrderId);

/// Every collection of the shop.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub users: Collection<User>,
    pub products: Collection<Product>,
    pub categories: Collection<Category>,
    pub carts: Collection<Cart>,
    pub payments: Collection<Payment>,
    pub orders: Collection<Order>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every collection out for serialization.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: self.users.list(),
            categories: self.categories.list(),
            products: self.products.list(),
            orders: self.orders.list(),
            carts: self.carts.list(),
            payments: self.payments.list(),
        }
    }
}

/// Point-in-time copy of the whole store.
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub carts: Vec<Cart>,
    pub payments: Vec<Payment>,
}
