//! The full journey: browse the catalog, fill a cart, check out, and review
//! the resulting order.
//!
//! Run with: cargo test -p marketplace-integration-tests

#![allow(clippy::indexing_slicing)]

use marketplace_core::{OrderId, OrderStatus, ProductId};
use marketplace_integration_tests::TestContext;
use marketplace_storefront::checkout::{CheckoutError, CustomerDetails};
use marketplace_storefront::storage::keys;
use rust_decimal::Decimal;

fn details() -> CustomerDetails {
    CustomerDetails {
        payment_method: "card".to_string(),
        shipping_address: "1 Main St, Springfield".to_string(),
        billing_address: "1 Main St, Springfield".to_string(),
    }
}

#[tokio::test]
async fn test_browse_fill_checkout() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();

    // Browse: four fixture products sit at or above the featured cutoff.
    let featured = session.products().get_featured().await.expect("featured");
    assert_eq!(featured.len(), 4);

    let hits = session.products().search("walnut").await.expect("search");
    assert_eq!(hits.len(), 1);
    let organizer = hits.first().expect("walnut product").clone();

    // Fill the cart.
    let skillet = session
        .products()
        .get_by_id(ProductId::new(4))
        .await
        .expect("skillet");
    session.cart_mut().add(&organizer);
    session.cart_mut().add(&organizer);
    session.cart_mut().add(&skillet);
    // 24.99 * 2 + 34.99
    assert_eq!(session.cart().total(), Decimal::new(8497, 2));

    // Check out: 84.97 + 6.80 tax + 9.99 shipping.
    let order = session.place_order(details()).await.expect("place order");
    assert_eq!(order.order_number, "MP-2024-004");
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.total, Decimal::new(10176, 2));
    assert_eq!(order.items.len(), 2);

    // The cart is cleared in memory and on disk.
    assert!(session.cart().is_empty());
    let raw = std::fs::read_to_string(ctx.storage_path(keys::CART)).expect("cart document");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("cart document is JSON");
    assert_eq!(doc["itemCount"], 0);

    // The order book grew from three seeded orders to four.
    let all = session.orders().get_all().await.expect("orders");
    assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn test_checkout_empty_cart_rejected() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();

    let result = session.place_order(details()).await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn test_free_shipping_over_threshold() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();

    let lamp = session
        .products()
        .get_by_id(ProductId::new(2))
        .await
        .expect("lamp");
    let skillet = session
        .products()
        .get_by_id(ProductId::new(4))
        .await
        .expect("skillet");
    session.cart_mut().add(&lamp);
    session.cart_mut().add(&skillet);

    // 124.98 subtotal clears the free shipping threshold; tax rounds to 10.00.
    let order = session.place_order(details()).await.expect("place order");
    assert_eq!(order.total, Decimal::new(13498, 2));
}

#[tokio::test]
async fn test_order_lookup_after_checkout() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();

    let organizer = session
        .products()
        .get_by_id(ProductId::new(1))
        .await
        .expect("organizer");
    session.cart_mut().add(&organizer);
    let placed = session.place_order(details()).await.expect("place order");

    let by_number = session
        .orders()
        .get_by_order_number(&placed.order_number)
        .await
        .expect("lookup by number");
    assert_eq!(by_number.id, placed.id);

    let by_id = session
        .orders()
        .get_by_id(OrderId::new(4))
        .await
        .expect("lookup by id");
    assert_eq!(by_id.order_number, "MP-2024-004");
}
