//! Wishlist flows: saving, toggling, and restoring across sessions.
//!
//! Run with: cargo test -p marketplace-integration-tests

#![allow(clippy::indexing_slicing)]

use marketplace_core::ProductId;
use marketplace_integration_tests::TestContext;
use marketplace_storefront::catalog::Product;
use marketplace_storefront::state::AppState;
use marketplace_storefront::storage::keys;

async fn product(state: &AppState, id: i32) -> Product {
    state
        .products()
        .get_by_id(ProductId::new(id))
        .await
        .expect("product missing from fixture")
}

#[tokio::test]
async fn test_saving_twice_keeps_one_entry() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();
    let pour_over = product(&session, 3).await;

    session.wishlist_mut().add(&pour_over);
    session.wishlist_mut().add(&pour_over);

    assert_eq!(session.wishlist().item_count(), 1);
    assert!(session.wishlist().contains(pour_over.id));
}

#[tokio::test]
async fn test_toggle_flips_membership() {
    let ctx = TestContext::new();
    let mut session = ctx.open_session();
    let pour_over = product(&session, 3).await;

    session.wishlist_mut().toggle(&pour_over);
    assert!(session.wishlist().contains(pour_over.id));

    session.wishlist_mut().toggle(&pour_over);
    assert!(!session.wishlist().contains(pour_over.id));
    assert!(session.wishlist().is_empty());
}

#[tokio::test]
async fn test_wishlist_survives_reload() {
    let ctx = TestContext::new();

    {
        let mut session = ctx.open_session();
        let organizer = product(&session, 1).await;
        let throw = product(&session, 5).await;
        session.wishlist_mut().add(&organizer);
        session.wishlist_mut().add(&throw);
        // Change of heart about the throw.
        session.wishlist_mut().toggle(&throw);
    }

    let reopened = ctx.open_session();
    assert_eq!(reopened.wishlist().item_count(), 1);
    assert!(reopened.wishlist().contains(ProductId::new(1)));
    assert!(!reopened.wishlist().contains(ProductId::new(5)));
    assert!(reopened.wishlist().last_updated().is_some());
}

#[tokio::test]
async fn test_wishlist_document_shape_on_disk() {
    let ctx = TestContext::new();

    let mut session = ctx.open_session();
    let pour_over = product(&session, 3).await;
    session.wishlist_mut().add(&pour_over);

    let raw = std::fs::read_to_string(ctx.storage_path(keys::WISHLIST))
        .expect("wishlist document exists");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("wishlist document is JSON");

    assert_eq!(doc["items"][0]["Id"], 3);
    assert_eq!(doc["items"][0]["name"], "Ceramic Pour-Over Set");
    assert_eq!(doc["items"][0]["price"], "39.99");
    assert!(doc["lastUpdated"].is_string());
}

#[tokio::test]
async fn test_corrupt_wishlist_document_loads_empty() {
    let ctx = TestContext::new();

    {
        let mut session = ctx.open_session();
        let pour_over = product(&session, 3).await;
        session.wishlist_mut().add(&pour_over);
    }
    std::fs::write(ctx.storage_path(keys::WISHLIST), "] oops [")
        .expect("overwrite wishlist document");

    let session = ctx.open_session();
    assert!(session.wishlist().is_empty());
}
