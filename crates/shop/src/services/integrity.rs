//! Referential integrity audit over the whole record store.
//!
//! Findings fall in two groups. Corruption means the order aggregate itself
//! is broken (a live order without its cart or payment, or a cart or payment
//! no order owns). Dangling references left behind by deleting a user,
//! product or category are expected since those deletes do not cascade, and
//! are reported as informational.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use hardstop_core::{CartId, CategoryId, OrderId, PaymentId, ProductId, UserId};

use crate::db::RecordStore;

/// One problem found by [`audit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "finding", rename_all = "snake_case")]
pub enum Finding {
    /// An order's cart is not in the store.
    MissingCart { order_id: OrderId, cart_id: CartId },
    /// An order's payment is not in the store.
    MissingPayment {
        order_id: OrderId,
        payment_id: PaymentId,
    },
    /// A cart that no order owns.
    OrphanCart { cart_id: CartId },
    /// A payment that no order owns.
    OrphanPayment { payment_id: PaymentId },
    /// A cart owned by more than one order.
    SharedCart {
        cart_id: CartId,
        orders: Vec<OrderId>,
    },
    /// A payment owned by more than one order.
    SharedPayment {
        payment_id: PaymentId,
        orders: Vec<OrderId>,
    },
    /// An order placed by a user who has since been deleted.
    UnknownUser { order_id: OrderId, user_id: UserId },
    /// A cart line naming a product that has since been deleted.
    UnknownProduct {
        cart_id: CartId,
        product_id: ProductId,
    },
    /// A product filed under a category that has since been deleted.
    UnknownCategory {
        product_id: ProductId,
        category_id: CategoryId,
    },
}

impl Finding {
    /// Whether this finding breaks the order aggregate.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        !matches!(
            self,
            Self::UnknownUser { .. } | Self::UnknownProduct { .. } | Self::UnknownCategory { .. }
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCart { order_id, cart_id } => {
                write!(f, "order {order_id} references missing cart {cart_id}")
            }
            Self::MissingPayment {
                order_id,
                payment_id,
            } => write!(f, "order {order_id} references missing payment {payment_id}"),
            Self::OrphanCart { cart_id } => write!(f, "cart {cart_id} has no order"),
            Self::OrphanPayment { payment_id } => write!(f, "payment {payment_id} has no order"),
            Self::SharedCart { cart_id, orders } => {
                write!(f, "cart {cart_id} is owned by {} orders", orders.len())
            }
            Self::SharedPayment { payment_id, orders } => {
                write!(f, "payment {payment_id} is owned by {} orders", orders.len())
            }
            Self::UnknownUser { order_id, user_id } => {
                write!(f, "order {order_id} belongs to deleted user {user_id}")
            }
            Self::UnknownProduct {
                cart_id,
                product_id,
            } => write!(f, "cart {cart_id} lists deleted product {product_id}"),
            Self::UnknownCategory {
                product_id,
                category_id,
            } => write!(f, "product {product_id} is filed under deleted category {category_id}"),
        }
    }
}

/// Result of [`audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrityReport {
    pub findings: Vec<Finding>,
}

impl IntegrityReport {
    /// True when no finding breaks the order aggregate.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.findings.iter().any(Finding::is_corruption)
    }

    /// True when there are no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Findings that break the order aggregate.
    pub fn corruption(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.is_corruption())
    }
}

/// Walk every collection and report broken or dangling references.
#[must_use]
pub fn audit(store: &RecordStore) -> IntegrityReport {
    let mut findings = Vec::new();
    let mut cart_owners: HashMap<CartId, Vec<OrderId>> = HashMap::new();
    let mut payment_owners: HashMap<PaymentId, Vec<OrderId>> = HashMap::new();

    for order in store.orders.iter() {
        cart_owners.entry(order.cart_id).or_default().push(order.id);
        payment_owners
            .entry(order.payment_id)
            .or_default()
            .push(order.id);

        if !store.carts.contains(&order.cart_id) {
            findings.push(Finding::MissingCart {
                order_id: order.id,
                cart_id: order.cart_id,
            });
        }
        if !store.payments.contains(&order.payment_id) {
            findings.push(Finding::MissingPayment {
                order_id: order.id,
                payment_id: order.payment_id,
            });
        }
        if !store.users.contains(&order.user_id) {
            findings.push(Finding::UnknownUser {
                order_id: order.id,
                user_id: order.user_id,
            });
        }
    }

    for cart in store.carts.iter() {
        match cart_owners.remove(&cart.id) {
            None => findings.push(Finding::OrphanCart { cart_id: cart.id }),
            Some(orders) if orders.len() > 1 => findings.push(Finding::SharedCart {
                cart_id: cart.id,
                orders,
            }),
            Some(_) => {}
        }
        for item in &cart.items {
            if !store.products.contains(&item.product_id) {
                findings.push(Finding::UnknownProduct {
                    cart_id: cart.id,
                    product_id: item.product_id,
                });
            }
        }
    }

    for payment in store.payments.iter() {
        match payment_owners.remove(&payment.id) {
            None => findings.push(Finding::OrphanPayment {
                payment_id: payment.id,
            }),
            Some(orders) if orders.len() > 1 => findings.push(Finding::SharedPayment {
                payment_id: payment.id,
                orders,
            }),
            Some(_) => {}
        }
    }

    for product in store.products.iter() {
        if let Some(category_id) = product.category_id
            && !store.categories.contains(&category_id)
        {
            findings.push(Finding::UnknownCategory {
                product_id: product.id,
                category_id,
            });
        }
    }

    IntegrityReport { findings }
}
