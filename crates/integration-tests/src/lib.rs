//! Integration tests for Hardstop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hardstop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_lifecycle` - Order aggregate create, update and delete
//! - `catalog` - Users, products, categories and favorites
//! - `concurrency` - Many callers sharing one application state
//! - `seeding` - Demo dataset and configuration
//!
//! Everything runs in process against a fresh [`AppState`]; no external
//! services are needed.

use chrono::{DateTime, TimeZone, Utc};

use hardstop_core::{OrderStatus, Price, ProductId, UserId};
use hardstop_shop::config::OrderHistoryPolicy;
use hardstop_shop::models::{CartLineInput, OrderInput, PaymentInput, ProductInput, UserInput};
use hardstop_shop::{AppState, Result, ShopConfig};

/// A fresh, unseeded shop with one user and two products.
pub struct TestContext {
    pub state: AppState,
    /// "U1"
    pub user: UserId,
    /// "P1", listed at 50.00
    pub p1: ProductId,
    /// "P2", listed at 20.00
    pub p2: ProductId,
}

impl TestContext {
    /// Build a context that retains order history on delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture products cannot be created.
    pub async fn new() -> Result<Self> {
        Self::with_policy(OrderHistoryPolicy::Retain).await
    }

    /// Build a context with the given order history policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture products cannot be created.
    pub async fn with_policy(order_history: OrderHistoryPolicy) -> Result<Self> {
        let state = AppState::new(ShopConfig {
            seed_demo_data: false,
            order_history,
        })?;

        let user = state
            .users()
            .create(UserInput {
                name: "U1".to_string(),
                email: "u1@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .id;
        let p1 = state.products().create(product("P1", 5000)).await?.id;
        let p2 = state.products().create(product("P2", 2000)).await?.id;

        Ok(Self {
            state,
            user,
            p1,
            p2,
        })
    }
}

/// Fixed timestamp used by every fixture order.
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Product input with a price in cents.
#[must_use]
pub fn product(name: &str, cents: i64) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        description: String::new(),
        price: Price::from_cents(cents),
        stock: 100,
        category_id: None,
    }
}

/// One cart line with a unit price in cents.
#[must_use]
pub fn line(product_id: ProductId, quantity: u32, cents: i64) -> CartLineInput {
    CartLineInput {
        product_id,
        quantity,
        unit_price: Price::from_cents(cents),
    }
}

/// A pending order paid by card for `amount_cents`, validated.
#[must_use]
pub fn order(items: Vec<CartLineInput>, amount_cents: i64) -> OrderInput {
    OrderInput {
        ordered_at: fixed_time(),
        status: OrderStatus::Pending,
        items,
        payment: PaymentInput {
            method: "card".to_string(),
            paid_at: fixed_time(),
            amount: Price::from_cents(amount_cents),
            validated: true,
        },
    }
}
