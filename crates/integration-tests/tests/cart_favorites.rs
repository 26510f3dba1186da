//! Integration tests for cart and favorites actions.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use homestore_core::{CartItemId, FavoriteId, ProductId, Role};
use homestore_integration_tests::TestContext;
use homestore_storefront::pages::AlertLevel;
use serde_json::json;

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_twice_keeps_one_line() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(2, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    let product = ProductId::new(ids[0]);

    let first = ctx.store.shop().add_to_cart(Some(&session), product).await;
    assert_eq!(first.level, AlertLevel::Success);
    assert_eq!(first.message, "Added to cart!");

    let second = ctx.store.shop().add_to_cart(Some(&session), product).await;
    assert!(second.is_error());
    assert_eq!(second.message, "This product is already in your cart!");

    let lines = ctx.catalog.records("cart");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 1);
    assert_eq!(lines[0]["userId"], 3);
}

#[tokio::test]
async fn test_cart_actions_need_login() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");

    let alert = ctx
        .store
        .shop()
        .add_to_cart(None, ProductId::new(ids[0]))
        .await;
    assert!(alert.is_error());
    assert_eq!(alert.message, "Please log in to continue");
    assert!(ctx.catalog.records("cart").is_empty());
}

#[tokio::test]
async fn test_add_to_cart_service_failure() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    ctx.catalog.fail("cart");

    let alert = ctx
        .store
        .shop()
        .add_to_cart(Some(&session), ProductId::new(ids[0]))
        .await;
    assert!(alert.is_error());
    assert_eq!(alert.message, "Failed to add to cart");
}

#[tokio::test]
async fn test_cart_view_and_totals() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(2, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": ids[0], "quantity": 2}));
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": ids[1], "quantity": 1}));
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": 999, "quantity": 1}));
    ctx.catalog.insert("cart", json!({"userId": 4, "productId": ids[0], "quantity": 5}));

    let view = ctx.store.cart().render(Some(&session)).await.unwrap();
    assert_eq!(view.lines.len(), 3);
    assert_eq!(view.lines[2].name(), "Unknown Product");
    // 2 x $10 + 1 x $20 + unknown at $0
    assert_eq!(view.totals.items, 4);
    assert_eq!(view.totals.price.to_string(), "$40.00");
    assert!(view.checkout_enabled());
}

#[tokio::test]
async fn test_update_quantity() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    let line = ctx
        .catalog
        .insert("cart", json!({"userId": 3, "productId": ids[0], "quantity": 1}));

    let alert = ctx
        .store
        .cart()
        .update_quantity(Some(&session), CartItemId::new(line), 4)
        .await;
    assert!(!alert.is_error(), "{}", alert.message);
    assert_eq!(ctx.catalog.record("cart", line).unwrap()["quantity"], 4);

    let alert = ctx
        .store
        .cart()
        .update_quantity(Some(&session), CartItemId::new(line), 0)
        .await;
    assert_eq!(alert.message, "Quantity must be at least 1");
    assert_eq!(ctx.catalog.record("cart", line).unwrap()["quantity"], 4);
}

#[tokio::test]
async fn test_cannot_touch_another_users_cart() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    let line = ctx
        .catalog
        .insert("cart", json!({"userId": 4, "productId": ids[0], "quantity": 1}));

    let alert = ctx
        .store
        .cart()
        .remove(Some(&session), CartItemId::new(line))
        .await;
    assert_eq!(alert.message, "Cart item not found");
    assert!(ctx.catalog.record("cart", line).is_some());
}

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(2, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": ids[0], "quantity": 2}));
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": ids[1], "quantity": 1}));
    ctx.catalog.insert("cart", json!({"userId": 4, "productId": ids[1], "quantity": 1}));

    let alert = ctx.store.cart().checkout(Some(&session)).await;
    assert_eq!(alert.message, "Purchase successful! Your cart has been cleared.");

    let orders = ctx.catalog.records("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["userId"], 3);
    assert_eq!(orders[0]["items"].as_array().unwrap().len(), 2);

    let remaining = ctx.catalog.records("cart");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["userId"], 4);

    let alert = ctx.store.cart().checkout(Some(&session)).await;
    assert_eq!(alert.level, AlertLevel::Info);
    assert_eq!(alert.message, "Your cart is empty!");
}

#[tokio::test]
async fn test_checkout_failure() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    ctx.catalog.insert("cart", json!({"userId": 3, "productId": ids[0], "quantity": 1}));
    ctx.catalog.fail("orders");

    let alert = ctx.store.cart().checkout(Some(&session)).await;
    assert_eq!(alert.message, "Failed to process purchase");
    assert_eq!(ctx.catalog.records("cart").len(), 1);
}

// =============================================================================
// Favorites
// =============================================================================

#[tokio::test]
async fn test_toggle_favorite() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(1, "Chairs");
    let session = ctx.login_as(3, Role::Customer).await;
    let product = ProductId::new(ids[0]);

    let alert = ctx.store.shop().toggle_favorite(Some(&session), product).await;
    assert_eq!(alert.message, "Added to favorites!");
    assert_eq!(ctx.catalog.records("favorites").len(), 1);

    let alert = ctx.store.shop().toggle_favorite(Some(&session), product).await;
    assert_eq!(alert.message, "Removed from favorites!");
    assert!(ctx.catalog.records("favorites").is_empty());
}

#[tokio::test]
async fn test_favorites_page() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(2, "Lamps");
    let session = ctx.login_as(3, Role::Customer).await;
    let favorite = ctx
        .catalog
        .insert("favorites", json!({"userId": 3, "productId": ids[1]}));

    let cards = ctx.store.favorites().render(Some(&session)).await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Lamps 2");

    let alert = ctx
        .store
        .favorites()
        .add_to_cart(Some(&session), ProductId::new(ids[1]))
        .await;
    assert_eq!(alert.message, "Added to cart!");

    let alert = ctx
        .store
        .favorites()
        .remove(Some(&session), FavoriteId::new(favorite))
        .await;
    assert_eq!(alert.message, "Removed from favorites!");
    assert!(
        ctx.store
            .favorites()
            .render(Some(&session))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_favorites_page_needs_login() {
    let ctx = TestContext::new().await;
    assert!(ctx.store.favorites().render(None).await.is_err());
}
