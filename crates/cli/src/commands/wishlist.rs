//! Wishlist commands.
//!
//! # Usage
//!
//! ```bash
//! # Save a product, look at the list, change your mind
//! mp-cli wishlist add 3
//! mp-cli wishlist show
//! mp-cli wishlist toggle 3
//! ```

use marketplace_core::ProductId;
use marketplace_storefront::state::AppState;
use tracing::info;

/// Show the saved products.
pub fn show(state: &AppState) {
    let wishlist = state.wishlist();
    if wishlist.is_empty() {
        info!("Wishlist is empty");
        return;
    }

    info!("Wishlist ({} items)", wishlist.item_count());
    for product in wishlist.items() {
        info!("  [{}] {} ({})", product.id, product.name, product.price);
    }
    if let Some(when) = wishlist.last_updated() {
        info!("Last updated: {}", when.format("%Y-%m-%d %H:%M UTC"));
    }
}

/// Save a product. Saving one that is already on the list changes nothing.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub async fn add(state: &mut AppState, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.products().get_by_id(ProductId::new(id)).await?;
    state.wishlist_mut().add(&product);
    info!("Added {} to wishlist", product.name);
    Ok(())
}

/// Remove a saved product.
pub fn remove(state: &mut AppState, id: i32) {
    state.wishlist_mut().remove(ProductId::new(id));
    info!("Removed product {id} from wishlist");
}

/// Save a product, or remove it if already saved.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub async fn toggle(state: &mut AppState, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.products().get_by_id(ProductId::new(id)).await?;
    state.wishlist_mut().toggle(&product);

    if state.wishlist().contains(product.id) {
        info!("Added {} to wishlist", product.name);
    } else {
        info!("Removed {} from wishlist", product.name);
    }
    Ok(())
}

/// Clear the wishlist.
pub fn clear(state: &mut AppState) {
    state.wishlist_mut().clear();
    info!("Wishlist cleared");
}
