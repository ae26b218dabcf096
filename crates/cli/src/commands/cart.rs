//! Cart management and checkout commands.
//!
//! # Usage
//!
//! ```bash
//! # Build up a cart
//! mp-cli cart add 3
//! mp-cli cart set-quantity 3 2
//! mp-cli cart show
//!
//! # Place the order
//! mp-cli cart checkout -s "1 Main St, Springfield"
//! ```

use marketplace_core::ProductId;
use marketplace_storefront::checkout::{CustomerDetails, OrderTotals};
use marketplace_storefront::state::AppState;
use thiserror::Error;
use tracing::info;

/// Errors raised by cart command input validation.
#[derive(Debug, Error)]
pub enum CartError {
    /// Checkout needs somewhere to ship to.
    #[error("Shipping address must not be empty")]
    EmptyShippingAddress,
}

/// Show the cart contents and totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    info!("Cart ({} items)", cart.item_count());
    for line in cart.items() {
        info!(
            "  [{}] {} x{} @ {} = ${:.2}",
            line.id,
            line.name,
            line.quantity,
            line.unit_price,
            line.line_total()
        );
    }
    info!("Subtotal: ${:.2}", cart.total());

    match state
        .checkout_policy()
        .remaining_for_free_shipping(cart.total())
    {
        None => info!("Shipping: free"),
        Some(gap) => info!("Add ${gap:.2} more for free shipping"),
    }
}

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub async fn add(state: &mut AppState, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.products().get_by_id(ProductId::new(id)).await?;
    state.cart_mut().add(&product);

    let quantity = state
        .cart()
        .items()
        .iter()
        .find(|line| line.id == product.id)
        .map_or(0, |line| line.quantity.get());
    info!("Added {} to cart (x{quantity})", product.name);
    Ok(())
}

/// Remove a product from the cart.
pub fn remove(state: &mut AppState, id: i32) {
    state.cart_mut().remove(ProductId::new(id));
    info!("Removed product {id} from cart");
}

/// Set the quantity of a cart line.
pub fn set_quantity(state: &mut AppState, id: i32, quantity: i64) {
    let id = ProductId::new(id);
    state.cart_mut().set_quantity(id, quantity);

    // Report the quantity that actually stuck, which may be clamped.
    match state.cart().items().iter().find(|line| line.id == id) {
        Some(line) => info!("Set {} to x{}", line.name, line.quantity),
        None => info!("Removed product {id} from cart"),
    }
}

/// Empty the cart.
pub fn clear(state: &mut AppState) {
    state.cart_mut().clear();
    info!("Cart cleared");
}

/// Price the cart and place an order.
///
/// # Errors
///
/// Returns an error if the shipping address is empty, the cart is empty, or
/// the order cannot be recorded.
pub async fn checkout(
    state: &mut AppState,
    payment_method: String,
    shipping_address: String,
    billing_address: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if shipping_address.trim().is_empty() {
        return Err(CartError::EmptyShippingAddress.into());
    }

    let totals = OrderTotals::compute(state.cart().total(), state.checkout_policy());
    let billing_address = billing_address.unwrap_or_else(|| shipping_address.clone());

    let order = state
        .place_order(CustomerDetails {
            payment_method,
            shipping_address,
            billing_address,
        })
        .await?;

    info!("Order placed!");
    info!("  Order number: {}", order.order_number);
    info!("  Subtotal: ${:.2}", totals.subtotal);
    info!("  Tax: ${:.2}", totals.tax);
    info!("  Shipping: ${:.2}", totals.shipping);
    info!("  Total: ${:.2}", order.total);
    Ok(())
}
