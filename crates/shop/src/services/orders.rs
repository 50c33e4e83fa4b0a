//! Order aggregate management.
//!
//! An order, its cart and its payment live in three separate collections
//! but are created, updated and deleted as one unit. Every reference a
//! request makes (the user, each cart line's product) is resolved before
//! anything is written, so a rejected request leaves the store untouched.
//!
//! The synchronous functions operate on a borrowed [`RecordStore`] and hold
//! the whole algorithm; [`OrderService`] wraps them with the store lock and
//! tracing.

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use hardstop_core::{OrderId, UserId};

use crate::config::OrderHistoryPolicy;
use crate::db::RecordStore;
use crate::error::{EntityKind, Result, ShopError};
use crate::models::{Cart, CartItem, CartLineInput, Order, OrderDetails, OrderInput, Payment};

/// Request field named by `InvalidReference` when a cart line's product is unknown.
pub const CART_PRODUCT_FIELD: &str = "items.product_id";

/// Order aggregate manager.
pub struct OrderService<'a> {
    store: &'a RwLock<RecordStore>,
    history: OrderHistoryPolicy,
}

impl<'a> OrderService<'a> {
    /// Create a new order service over a shared store.
    #[must_use]
    pub const fn new(store: &'a RwLock<RecordStore>, history: OrderHistoryPolicy) -> Self {
        Self { store, history }
    }

    /// Create an order with its cart and payment for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist,
    /// `InvalidReference` naming the first cart line whose product does not
    /// exist, or `InvalidQuantity` for a line with zero units. Nothing is
    /// written in any of these cases.
    #[instrument(skip(self, input), fields(user_id = %user_id, lines = input.items.len()))]
    pub async fn create(&self, user_id: UserId, input: OrderInput) -> Result<OrderDetails> {
        let mut store = self.store.write().await;
        let result = create_order(&mut store, user_id, input);
        drop(store);

        match &result {
            Ok(details) => info!(
                order_id = %details.id(),
                cart_id = %details.cart.id,
                payment_id = %details.payment.id,
                "Created order"
            ),
            Err(e) => warn!(error = %e, "Order creation rejected"),
        }
        result
    }

    /// Replace an order's cart lines and payment details.
    ///
    /// Order, cart and payment keep their IDs.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Order)` if the order does not exist,
    /// `InvalidReference` for the first unknown product, or `InvalidQuantity`
    /// for a line with zero units. The aggregate is unchanged in every case.
    #[instrument(skip(self, input), fields(order_id = %order_id, lines = input.items.len()))]
    pub async fn update(&self, order_id: OrderId, input: OrderInput) -> Result<OrderDetails> {
        let mut store = self.store.write().await;
        let result = update_order(&mut store, order_id, input);
        drop(store);

        match &result {
            Ok(details) => info!(
                status = %details.order.status,
                items = details.cart.items.len(),
                "Updated order"
            ),
            Err(e) => warn!(error = %e, "Order update rejected"),
        }
        result
    }

    /// Delete an order together with its cart and payment.
    ///
    /// Returns the removed aggregate.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Order)` if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id, history = %self.history))]
    pub async fn delete(&self, order_id: OrderId) -> Result<Order> {
        let mut store = self.store.write().await;
        let result = delete_order(&mut store, order_id, self.history);
        drop(store);

        match &result {
            Ok(order) => info!(user_id = %order.user_id, "Deleted order"),
            Err(e) => warn!(error = %e, "Order deletion rejected"),
        }
        result
    }

    /// Get an order with its cart and payment.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(Order)` if the order does not exist, or
    /// `DataCorruption` if its cart or payment is missing.
    pub async fn get(&self, order_id: OrderId) -> Result<OrderDetails> {
        let store = self.store.read().await;
        let order = store
            .orders
            .get(&order_id)
            .ok_or_else(|| ShopError::not_found(EntityKind::Order, order_id))?;
        load_details(&store, order)
    }

    /// List every order with its cart and payment, in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DataCorruption` if any order's cart or payment is missing.
    pub async fn list(&self) -> Result<Vec<OrderDetails>> {
        let store = self.store.read().await;
        store
            .orders
            .iter()
            .map(|order| load_details(&store, order))
            .collect()
    }

    /// List the live orders placed by one user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound(User)` if the user does not exist, or
    /// `DataCorruption` if an order's cart or payment is missing.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<OrderDetails>> {
        let store = self.store.read().await;
        if !store.users.contains(&user_id) {
            return Err(ShopError::not_found(EntityKind::User, user_id));
        }
        store
            .orders
            .iter()
            .filter(|order| order.user_id == user_id)
            .map(|order| load_details(&store, order))
            .collect()
    }
}

// =============================================================================
// Aggregate operations
// =============================================================================

/// Create an order aggregate. See [`OrderService::create`].
pub(crate) fn create_order(
    store: &mut RecordStore,
    user_id: UserId,
    input: OrderInput,
) -> Result<OrderDetails> {
    if !store.users.contains(&user_id) {
        return Err(ShopError::not_found(EntityKind::User, user_id));
    }
    let items = resolve_lines(store, &input.items)?;

    let cart = Cart::new(items);
    let payment = Payment::new(input.payment);
    let order = Order {
        id: OrderId::generate(),
        ordered_at: input.ordered_at,
        status: input.status,
        user_id,
        cart_id: cart.id,
        payment_id: payment.id,
    };

    // Every reference resolved; commit all of it.
    if let Some(user) = store.users.get_mut(&user_id) {
        user.orders.push(order.id);
    }
    store.carts.insert(cart.clone());
    store.payments.insert(payment.clone());
    store.orders.insert(order.clone());

    Ok(OrderDetails {
        order,
        cart,
        payment,
    })
}

/// Update an order aggregate in place. See [`OrderService::update`].
pub(crate) fn update_order(
    store: &mut RecordStore,
    order_id: OrderId,
    input: OrderInput,
) -> Result<OrderDetails> {
    let mut order = store
        .orders
        .get(&order_id)
        .cloned()
        .ok_or_else(|| ShopError::not_found(EntityKind::Order, order_id))?;
    let items = resolve_lines(store, &input.items)?;

    let mut cart = store
        .carts
        .get(&order.cart_id)
        .cloned()
        .ok_or_else(|| missing_part(&order, EntityKind::Cart))?;
    let mut payment = store
        .payments
        .get(&order.payment_id)
        .cloned()
        .ok_or_else(|| missing_part(&order, EntityKind::Payment))?;

    cart.items = items;
    payment.apply(input.payment);
    order.ordered_at = input.ordered_at;
    order.status = input.status;

    // Same IDs, so each insert replaces the existing row in place.
    store.carts.insert(cart.clone());
    store.payments.insert(payment.clone());
    store.orders.insert(order.clone());

    Ok(OrderDetails {
        order,
        cart,
        payment,
    })
}

/// Remove an order aggregate. See [`OrderService::delete`].
pub(crate) fn delete_order(
    store: &mut RecordStore,
    order_id: OrderId,
    history: OrderHistoryPolicy,
) -> Result<Order> {
    let order = store
        .orders
        .remove(&order_id)
        .ok_or_else(|| ShopError::not_found(EntityKind::Order, order_id))?;

    if store.carts.remove(&order.cart_id).is_none() {
        warn!(cart_id = %order.cart_id, "Deleted order had no cart");
    }
    if store.payments.remove(&order.payment_id).is_none() {
        warn!(payment_id = %order.payment_id, "Deleted order had no payment");
    }

    if history == OrderHistoryPolicy::Prune
        && let Some(user) = store.users.get_mut(&order.user_id)
    {
        user.orders.retain(|id| *id != order_id);
    }

    Ok(order)
}

/// Turn requested lines into cart items, failing on the first line that names
/// an unknown product or asks for zero units.
fn resolve_lines(store: &RecordStore, lines: &[CartLineInput]) -> Result<Vec<CartItem>> {
    lines
        .iter()
        .map(|line| {
            if !store.products.contains(&line.product_id) {
                return Err(ShopError::invalid_reference(
                    CART_PRODUCT_FIELD,
                    line.product_id,
                ));
            }
            if line.quantity == 0 {
                return Err(ShopError::InvalidQuantity {
                    product_id: line.product_id.into(),
                });
            }
            Ok(CartItem::from_line(line))
        })
        .collect()
}

/// Join an order with its cart and payment.
fn load_details(store: &RecordStore, order: &Order) -> Result<OrderDetails> {
    let cart = store
        .carts
        .get(&order.cart_id)
        .ok_or_else(|| missing_part(order, EntityKind::Cart))?;
    let payment = store
        .payments
        .get(&order.payment_id)
        .ok_or_else(|| missing_part(order, EntityKind::Payment))?;

    Ok(OrderDetails {
        order: order.clone(),
        cart: cart.clone(),
        payment: payment.clone(),
    })
}

fn missing_part(order: &Order, kind: EntityKind) -> ShopError {
    let id = match kind {
        EntityKind::Payment => order.payment_id.to_string(),
        _ => order.cart_id.to_string(),
    };
    ShopError::DataCorruption(format!("order {} references missing {kind} {id}", order.id))
}
