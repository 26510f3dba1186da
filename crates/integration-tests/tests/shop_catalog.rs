//! Integration tests for the shop page: filters, pagination and rendering.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use homestore_core::Role;
use homestore_integration_tests::{TestContext, product};
use homestore_storefront::pages::shop::{FilterState, ITEMS_PER_PAGE};
use homestore_storefront::pages::{ShopEvent, ShopView};

// =============================================================================
// fetch_products
// =============================================================================

#[tokio::test]
async fn test_page_three_of_twenty_five() {
    let ctx = TestContext::new().await;
    ctx.seed_products(25, "Chairs");

    let listing = ctx
        .store
        .shop()
        .fetch_products(&FilterState::default(), 3)
        .await;
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.total, 25);

    let mut view = ShopView::new();
    view.page.request_page(3);
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(page.cards.len(), 1);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.pages, [1, 2, 3]);
    assert!(!page.pagination.next_enabled);
}

#[tokio::test]
async fn test_first_page_is_full() {
    let ctx = TestContext::new().await;
    ctx.seed_products(25, "Chairs");

    let mut view = ShopView::new();
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(page.cards.len(), ITEMS_PER_PAGE as usize);
    assert_eq!(page.total_items, 25);
    assert!(page.actions_enabled);
    assert!(!page.pagination.prev_enabled);
}

#[tokio::test]
async fn test_two_categories_are_or_combined() {
    let ctx = TestContext::new().await;
    ctx.seed_products(3, "Chairs");
    ctx.seed_products(2, "Tables");
    ctx.seed_products(4, "Lamps");

    let mut view = ShopView::new();
    view.apply(ShopEvent::ToggleCategory("Chairs".to_string()));
    view.apply(ShopEvent::ToggleCategory("Tables".to_string()));
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(page.total_items, 5);
    assert!(
        page.cards
            .iter()
            .all(|c| c.category == "Chairs" || c.category == "Tables")
    );

    view.apply(ShopEvent::AllCategories);
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(page.total_items, 9);
}

#[tokio::test]
async fn test_search_sort_and_price_range() {
    let ctx = TestContext::new().await;
    ctx.catalog.insert("products", product("Oak table", 320.0, "Tables"));
    ctx.catalog.insert("products", product("Oak chair", 120.0, "Chairs"));
    ctx.catalog.insert("products", product("Oak stool", 45.5, "Chairs"));
    ctx.catalog.insert("products", product("Pine shelf", 80.0, "Shelves"));

    let mut view = ShopView::new();
    view.apply(ShopEvent::Search("oak".to_string()));
    view.apply(ShopEvent::Sort(Some("price,desc".parse().unwrap())));
    let page = ctx.store.shop().render(&mut view, None).await;
    let names: Vec<_> = page.cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Oak table", "Oak chair", "Oak stool"]);

    view.apply(ShopEvent::PriceRange {
        min: Some("50".parse().unwrap()),
        max: Some("200".parse().unwrap()),
    });
    let page = ctx.store.shop().render(&mut view, None).await;
    let names: Vec<_> = page.cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Oak chair"]);
}

// =============================================================================
// render
// =============================================================================

#[tokio::test]
async fn test_out_of_range_page_is_pulled_back() {
    let ctx = TestContext::new().await;
    ctx.seed_products(25, "Chairs");

    let mut view = ShopView::new();
    view.page.request_page(9);
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(view.page.current_page(), 3);
    assert_eq!(page.pagination.current_page, 3);
    assert_eq!(page.cards.len(), 1);
}

#[tokio::test]
async fn test_filter_change_resets_to_first_page() {
    let ctx = TestContext::new().await;
    ctx.seed_products(25, "Chairs");
    ctx.seed_products(2, "Lamps");

    let mut view = ShopView::new();
    ctx.store.shop().render(&mut view, None).await;
    assert!(view.apply(ShopEvent::LastPage));
    assert_eq!(view.page.current_page(), 3);

    view.apply(ShopEvent::ToggleCategory("Lamps".to_string()));
    assert_eq!(view.page.current_page(), 1);
    let page = ctx.store.shop().render(&mut view, None).await;
    assert_eq!(page.cards.len(), 2);
    assert_eq!(page.pagination.total_pages, 1);
}

#[tokio::test]
async fn test_no_matches_renders_empty_state() {
    let ctx = TestContext::new().await;
    ctx.seed_products(5, "Chairs");

    let mut view = ShopView::new();
    view.apply(ShopEvent::Search("velvet".to_string()));
    let page = ctx.store.shop().render(&mut view, None).await;
    assert!(page.is_empty());
    assert!(!page.actions_enabled);
    assert!(page.pagination.is_empty());
    assert_eq!(view.page.current_page(), 1);
}

#[tokio::test]
async fn test_service_failure_renders_empty_state() {
    let ctx = TestContext::new().await;
    ctx.seed_products(5, "Chairs");
    ctx.catalog.fail("products");

    let listing = ctx
        .store
        .shop()
        .fetch_products(&FilterState::default(), 1)
        .await;
    assert!(listing.is_empty());
    assert_eq!(listing.total, 0);

    let mut view = ShopView::new();
    let page = ctx.store.shop().render(&mut view, None).await;
    assert!(page.is_empty());
    assert!(page.pagination.is_empty());
}

#[tokio::test]
async fn test_favorites_are_marked_for_logged_in_user() {
    let ctx = TestContext::new().await;
    let ids = ctx.seed_products(3, "Chairs");
    let session = ctx.login_as(7, Role::Customer).await;
    ctx.catalog.insert(
        "favorites",
        serde_json::json!({"userId": 7, "productId": ids[1]}),
    );
    ctx.catalog.insert(
        "favorites",
        serde_json::json!({"userId": 8, "productId": ids[2]}),
    );

    let mut view = ShopView::new();
    let page = ctx.store.shop().render(&mut view, Some(&session)).await;
    let marked: Vec<_> = page
        .cards
        .iter()
        .filter(|c| c.favorite)
        .map(|c| c.id.as_i64())
        .collect();
    assert_eq!(marked, [ids[1]]);
    assert!(!page.admin);

    let page = ctx.store.shop().render(&mut view, None).await;
    assert!(page.cards.iter().all(|c| !c.favorite));
}

#[tokio::test]
async fn test_admin_sees_admin_controls() {
    let ctx = TestContext::new().await;
    ctx.seed_products(1, "Chairs");
    let admin = ctx.login_as(1, Role::Admin).await;

    let page = ctx
        .store
        .shop()
        .render(&mut ShopView::new(), Some(&admin))
        .await;
    assert!(page.admin);
}

#[tokio::test]
async fn test_categories_in_first_seen_order() {
    let ctx = TestContext::new().await;
    ctx.seed_products(2, "Tables");
    ctx.seed_products(1, "Chairs");
    ctx.seed_products(1, "Tables");

    assert_eq!(ctx.store.shop().categories().await, ["Tables", "Chairs"]);

    ctx.catalog.fail("products");
    assert!(ctx.store.shop().categories().await.is_empty());
}
