//! Order review commands.
//!
//! # Usage
//!
//! ```bash
//! # List everything, then drill in
//! mp-cli orders list
//! mp-cli orders show 1
//! mp-cli orders track MP-2024-001
//! ```

use marketplace_core::OrderId;
use marketplace_storefront::orders::Order;
use marketplace_storefront::state::AppState;
use tracing::info;

fn print_order(order: &Order) {
    info!("Order {}", order.order_number);
    info!("  Placed: {}", order.order_date.format("%Y-%m-%d"));
    info!("  Status: {}", order.status);
    if let Some(tracking) = &order.tracking_number {
        info!("  Tracking: {tracking}");
    }
    for line in &order.items {
        info!("  {} x{} @ {}", line.name, line.quantity, line.unit_price);
    }
    info!("  Total: ${:.2}", order.total);
}

/// List every order.
///
/// # Errors
///
/// Returns an error if the order book cannot be read.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let orders = state.orders().get_all().await?;
    info!("{} orders", orders.len());
    for order in &orders {
        info!(
            "  {} {} {} ${:.2}",
            order.order_number,
            order.order_date.format("%Y-%m-%d"),
            order.status,
            order.total
        );
    }
    Ok(())
}

/// Show one order in full.
///
/// # Errors
///
/// Returns an error if the order does not exist.
pub async fn show(state: &AppState, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let order = state.orders().get_by_id(OrderId::new(id)).await?;
    print_order(&order);
    Ok(())
}

/// Look an order up by its order number.
///
/// # Errors
///
/// Returns an error if no order has that number.
pub async fn track(state: &AppState, number: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = state.orders().get_by_order_number(number).await?;
    print_order(&order);
    Ok(())
}
