//! Integration tests for the order aggregate (order + cart + payment).

use hardstop_core::{OrderId, OrderStatus, Price, ProductId, UserId};
use hardstop_integration_tests::{TestContext, line, order};
use hardstop_shop::config::OrderHistoryPolicy;
use hardstop_shop::services::orders::CART_PRODUCT_FIELD;
use hardstop_shop::{EntityKind, ShopError};

async fn row_counts(ctx: &TestContext) -> (usize, usize, usize) {
    let store = ctx.state.store().read().await;
    (store.orders.len(), store.carts.len(), store.payments.len())
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_worked_example() {
    let ctx = TestContext::new().await.unwrap();

    let details = ctx
        .state
        .orders()
        .create(ctx.user, order(vec![line(ctx.p1, 2, 5000)], 10000))
        .await
        .unwrap();

    assert_eq!(details.order.status, OrderStatus::Pending);
    assert_eq!(details.order.user_id, ctx.user);
    assert_eq!(details.cart.items.len(), 1);
    let item = &details.cart.items[0];
    assert_eq!(item.product_id, ctx.p1);
    assert_eq!(item.quantity, 2);
    assert_eq!(item.unit_price, Price::from_cents(5000));
    assert_eq!(details.payment.amount, Price::from_cents(10000));
    assert!(details.payment.validated);
    assert_eq!(details.total(), Some(details.payment.amount));
}

#[tokio::test]
async fn test_create_keeps_line_order() {
    let ctx = TestContext::new().await.unwrap();
    let lines = vec![
        line(ctx.p2, 1, 2000),
        line(ctx.p1, 3, 4500),
        line(ctx.p2, 2, 1900),
    ];

    let details = ctx
        .state
        .orders()
        .create(ctx.user, order(lines.clone(), 0))
        .await
        .unwrap();

    let got: Vec<_> = details
        .cart
        .items
        .iter()
        .map(|i| (i.product_id, i.quantity, i.unit_price))
        .collect();
    let want: Vec<_> = lines
        .iter()
        .map(|l| (l.product_id, l.quantity, l.unit_price))
        .collect();
    assert_eq!(got, want);
}

#[tokio::test]
async fn test_create_unknown_user_changes_nothing() {
    let ctx = TestContext::new().await.unwrap();
    let ghost = UserId::generate();

    let err = ctx
        .state
        .orders()
        .create(ghost, order(vec![line(ctx.p1, 1, 5000)], 5000))
        .await
        .unwrap_err();

    assert_eq!(err, ShopError::not_found(EntityKind::User, ghost));
    assert!(err.is_client_error());
    assert_eq!(row_counts(&ctx).await, (0, 0, 0));
}

#[tokio::test]
async fn test_create_one_bad_product_changes_nothing() {
    let ctx = TestContext::new().await.unwrap();
    let ghost = ProductId::generate();

    let err = ctx
        .state
        .orders()
        .create(
            ctx.user,
            order(
                vec![line(ctx.p1, 1, 5000), line(ghost, 1, 100), line(ctx.p2, 1, 2000)],
                7100,
            ),
        )
        .await
        .unwrap_err();

    assert_eq!(err, ShopError::invalid_reference(CART_PRODUCT_FIELD, ghost));
    assert_eq!(row_counts(&ctx).await, (0, 0, 0));
    assert!(ctx.state.users().get(ctx.user).await.unwrap().orders.is_empty());
}

#[tokio::test]
async fn test_create_zero_quantity_changes_nothing() {
    let ctx = TestContext::new().await.unwrap();

    let err = ctx
        .state
        .orders()
        .create(ctx.user, order(vec![line(ctx.p1, 0, 5000)], 0))
        .await
        .unwrap_err();

    assert!(matches!(err, ShopError::InvalidQuantity { .. }));
    assert!(err.is_client_error());
    assert_eq!(row_counts(&ctx).await, (0, 0, 0));
    assert!(ctx.state.users().get(ctx.user).await.unwrap().orders.is_empty());
}

#[tokio::test]
async fn test_update_zero_quantity_keeps_previous_items() {
    let ctx = TestContext::new().await.unwrap();
    let orders = ctx.state.orders();
    let created = orders
        .create(ctx.user, order(vec![line(ctx.p1, 2, 5000)], 10000))
        .await
        .unwrap();

    let err = orders
        .update(
            created.id(),
            order(vec![line(ctx.p1, 1, 5000), line(ctx.p2, 0, 2000)], 5000),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ShopError::InvalidQuantity { .. }));
    assert_eq!(orders.get(created.id()).await.unwrap(), created);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_replaces_items() {
    let ctx = TestContext::new().await.unwrap();
    let orders = ctx.state.orders();
    let created = orders
        .create(
            ctx.user,
            order(vec![line(ctx.p1, 1, 5000), line(ctx.p2, 1, 2000)], 7000),
        )
        .await
        .unwrap();

    let mut change = order(vec![line(ctx.p1, 1, 5000)], 5000);
    change.status = OrderStatus::Processing;
    let updated = orders.update(created.id(), change).await.unwrap();

    assert_eq!(updated.cart.items.len(), 1);
    assert_eq!(updated.cart.items[0].product_id, ctx.p1);
    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.cart.id, created.cart.id);
    assert_eq!(updated.payment.id, created.payment.id);
    assert_eq!(updated.order.status, OrderStatus::Processing);

    assert_eq!(orders.get(created.id()).await.unwrap(), updated);
    assert_eq!(row_counts(&ctx).await, (1, 1, 1));
}

#[tokio::test]
async fn test_failed_update_keeps_previous_items() {
    let ctx = TestContext::new().await.unwrap();
    let orders = ctx.state.orders();
    let created = orders
        .create(
            ctx.user,
            order(vec![line(ctx.p1, 1, 5000), line(ctx.p2, 1, 2000)], 7000),
        )
        .await
        .unwrap();

    let ghost = ProductId::generate();
    let err = orders
        .update(created.id(), order(vec![line(ghost, 1, 1)], 1))
        .await
        .unwrap_err();

    assert!(matches!(err, ShopError::InvalidReference { .. }));
    assert_eq!(orders.get(created.id()).await.unwrap(), created);
}

#[tokio::test]
async fn test_update_unknown_order() {
    let ctx = TestContext::new().await.unwrap();
    let ghost = OrderId::generate();

    let err = ctx
        .state
        .orders()
        .update(ghost, order(Vec::new(), 0))
        .await
        .unwrap_err();
    assert_eq!(err, ShopError::not_found(EntityKind::Order, ghost));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_removes_aggregate() {
    let ctx = TestContext::new().await.unwrap();
    let orders = ctx.state.orders();
    let created = orders
        .create(ctx.user, order(vec![line(ctx.p1, 1, 5000)], 5000))
        .await
        .unwrap();

    orders.delete(created.id()).await.unwrap();

    {
        let store = ctx.state.store().read().await;
        assert!(store.carts.get(&created.cart.id).is_none());
        assert!(store.payments.get(&created.payment.id).is_none());
    }
    assert_eq!(
        orders.get(created.id()).await.unwrap_err(),
        ShopError::not_found(EntityKind::Order, created.id())
    );
    assert_eq!(row_counts(&ctx).await, (0, 0, 0));
    assert!(ctx.state.audit().await.is_clean());
}

#[tokio::test]
async fn test_delete_history_policies() {
    for (policy, kept) in [
        (OrderHistoryPolicy::Retain, true),
        (OrderHistoryPolicy::Prune, false),
    ] {
        let ctx = TestContext::with_policy(policy).await.unwrap();
        let created = ctx
            .state
            .orders()
            .create(ctx.user, order(Vec::new(), 0))
            .await
            .unwrap();

        ctx.state.orders().delete(created.id()).await.unwrap();

        let history = ctx.state.users().get(ctx.user).await.unwrap().orders;
        assert_eq!(history.contains(&created.id()), kept, "{policy}");
    }
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_list_for_user() {
    let ctx = TestContext::new().await.unwrap();
    let other = ctx
        .state
        .users()
        .create(hardstop_shop::models::UserInput {
            name: "U2".to_string(),
            email: "u2@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await;
    let orders = ctx.state.orders();

    let mine = orders.create(ctx.user, order(Vec::new(), 0)).await.unwrap();
    orders.create(other.id, order(Vec::new(), 0)).await.unwrap();

    assert_eq!(orders.list().await.unwrap().len(), 2);
    assert_eq!(orders.list_for_user(ctx.user).await.unwrap(), vec![mine]);
    assert!(orders.list_for_user(UserId::generate()).await.is_err());
}

#[tokio::test]
async fn test_order_json_carries_status_code() {
    let ctx = TestContext::new().await.unwrap();
    let mut input = order(vec![line(ctx.p1, 2, 5000)], 10000);
    input.status = OrderStatus::Shipped;
    let details = ctx.state.orders().create(ctx.user, input).await.unwrap();

    let json = serde_json::to_value(&details).unwrap();
    assert_eq!(json["status"], 2);
    assert_eq!(json["id"], details.id().to_string());
    assert_eq!(json["cart"]["items"][0]["unit_price"], "50.00");
}
