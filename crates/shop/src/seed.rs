//! Demo dataset.
//!
//! Two users, two categories, two products and one pending order for Alice.
//! The order goes through the aggregate operations so it lands in Alice's
//! order list like any other order would.

use chrono::Utc;
use tracing::info;

use hardstop_core::{CategoryId, OrderId, OrderStatus, Price, ProductId, UserId};

use crate::db::RecordStore;
use crate::error::Result;
use crate::models::{
    CartLineInput, Category, CategoryInput, OrderInput, PaymentInput, Product, ProductInput, User,
    UserInput,
};
use crate::services::orders::create_order;

/// IDs of everything [`seed_demo_data`] inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoData {
    pub alice: UserId,
    pub bob: UserId,
    pub category_1: CategoryId,
    pub category_2: CategoryId,
    pub product_a: ProductId,
    pub product_b: ProductId,
    pub order: OrderId,
}

/// Insert the demo dataset into `store`.
///
/// # Errors
///
/// Only fails if the seeded order cannot resolve the rows seeded just
/// before it, which would mean the store is broken.
pub fn seed_demo_data(store: &mut RecordStore) -> Result<DemoData> {
    let alice = insert_user(store, "Alice", "alice@example.com", "password123");
    let bob = insert_user(store, "Bob", "bob@example.com", "password456");

    let category_1 = insert_category(store, "Category 1");
    let category_2 = insert_category(store, "Category 2");

    let product_a = insert_product(store, "Product A", Price::from_cents(10000), 50, category_1);
    let product_b = insert_product(store, "Product B", Price::from_cents(20000), 30, category_2);

    let now = Utc::now();
    let order = create_order(
        store,
        alice,
        OrderInput {
            ordered_at: now,
            status: OrderStatus::Pending,
            items: vec![CartLineInput {
                product_id: product_a,
                quantity: 1,
                unit_price: Price::from_cents(10000),
            }],
            payment: PaymentInput {
                method: "Credit Card".to_string(),
                paid_at: now,
                amount: Price::from_cents(10000),
                validated: true,
            },
        },
    )?
    .id();

    info!(
        users = store.users.len(),
        products = store.products.len(),
        orders = store.orders.len(),
        "Seeded demo data"
    );

    Ok(DemoData {
        alice,
        bob,
        category_1,
        category_2,
        product_a,
        product_b,
        order,
    })
}

fn insert_user(store: &mut RecordStore, name: &str, email: &str, password: &str) -> UserId {
    let user = User::new(UserInput {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    });
    let id = user.id;
    store.users.insert(user);
    id
}

fn insert_category(store: &mut RecordStore, name: &str) -> CategoryId {
    let category = Category::new(CategoryInput {
        name: name.to_string(),
    });
    let id = category.id;
    store.categories.insert(category);
    id
}

fn insert_product(
    store: &mut RecordStore,
    name: &str,
    price: Price,
    stock: u32,
    category_id: CategoryId,
) -> ProductId {
    let product = Product::new(ProductInput {
        name: name.to_string(),
        description: format!("Description of {name}"),
        price,
        stock,
        category_id: Some(category_id),
    });
    let id = product.id;
    store.products.insert(product);
    id
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    use crate::services::integrity::audit;

    #[test]
    fn test_seed_contents() {
        let mut store = RecordStore::new();
        let demo = seed_demo_data(&mut store).unwrap();

        assert_eq!(store.users.len(), 2);
        assert_eq!(store.categories.len(), 2);
        assert_eq!(store.products.len(), 2);
        assert_eq!(store.orders.len(), 1);

        let alice = store.users.get(&demo.alice).unwrap();
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.password.expose_secret(), "password123");
        assert_eq!(alice.orders, vec![demo.order]);
        assert!(store.users.get(&demo.bob).unwrap().orders.is_empty());

        let a = store.products.get(&demo.product_a).unwrap();
        assert_eq!(a.price, Price::from_cents(10000));
        assert_eq!(a.stock, 50);
        assert_eq!(a.category_id, Some(demo.category_1));
        assert_eq!(a.description, "Description of Product A");
        let b = store.products.get(&demo.product_b).unwrap();
        assert_eq!(b.category_id, Some(demo.category_2));
    }

    #[test]
    fn test_seeded_order() {
        let mut store = RecordStore::new();
        let demo = seed_demo_data(&mut store).unwrap();

        let order = store.orders.get(&demo.order).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, demo.alice);

        let cart = store.carts.get(&order.cart_id).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product_id, demo.product_a);
        assert_eq!(cart.total(), Some(Price::from_cents(10000)));

        let payment = store.payments.get(&order.payment_id).unwrap();
        assert_eq!(payment.method, "Credit Card");
        assert!(payment.validated);
    }

    #[test]
    fn test_seeded_store_passes_audit() {
        let mut store = RecordStore::new();
        seed_demo_data(&mut store).unwrap();
        assert!(audit(&store).is_clean());
    }
}
