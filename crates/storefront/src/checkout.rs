//! Checkout math and order placement.
//!
//! Pricing policy is data, not code: the tax rate and shipping rule live in
//! [`CheckoutPolicy`] so deployments can override them through configuration
//! (see [`crate::config`]).

use rust_decimal::Decimal;

use crate::orders::{Order, OrderDraft, OrderError, OrderLine, OrderService};
use crate::store::CartStore;

/// Pricing rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Sales tax rate applied to the subtotal, as a fraction.
    pub tax_rate: Decimal,
    /// Subtotal at which shipping becomes free.
    pub free_shipping_threshold: Decimal,
    /// Flat shipping charge below the threshold.
    pub flat_shipping: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::new(100, 0),
            flat_shipping: Decimal::new(999, 2),
        }
    }
}

impl CheckoutPolicy {
    /// Shipping charge for the given subtotal.
    #[must_use]
    pub fn shipping(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// How much more the subtotal needs to reach free shipping.
    ///
    /// `None` once the threshold is met.
    #[must_use]
    pub fn remaining_for_free_shipping(&self, subtotal: Decimal) -> Option<Decimal> {
        if subtotal >= self.free_shipping_threshold {
            None
        } else {
            Some(self.free_shipping_threshold - subtotal)
        }
    }
}

/// Itemized checkout amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Price out a subtotal under the given policy.
    ///
    /// Tax is rounded to cents.
    #[must_use]
    pub fn compute(subtotal: Decimal, policy: &CheckoutPolicy) -> Self {
        let tax = (subtotal * policy.tax_rate).round_dp(2);
        let shipping = policy.shipping(subtotal);
        Self {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

/// Customer-supplied details for an order.
#[derive(Debug, Clone)]
pub struct CustomerDetails {
    pub payment_method: String,
    pub shipping_address: String,
    pub billing_address: String,
}

/// Checkout errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Place an order from the current cart contents.
///
/// Prices the cart under `policy`, records the order, and only then clears
/// the cart, so a rejected order leaves the cart intact.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when there is nothing to buy, or the
/// underlying order error when recording fails.
pub async fn place_order(
    cart: &mut CartStore,
    orders: &OrderService,
    policy: &CheckoutPolicy,
    details: CustomerDetails,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let totals = OrderTotals::compute(cart.total(), policy);
    let items = cart
        .items()
        .iter()
        .map(|line| OrderLine {
            product_id: line.id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity.get(),
        })
        .collect();

    let order = orders
        .create(OrderDraft {
            total: totals.total,
            payment_method: details.payment_method,
            shipping_address: details.shipping_address,
            billing_address: details.billing_address,
            items,
        })
        .await?;

    cart.clear();
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use marketplace_core::{Price, ProductId};

    use super::*;
    use crate::catalog::Product;
    use crate::storage::MemoryStorage;

    fn product(id: i32, price_cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(price_cents),
            images: Vec::new(),
            category: "gadgets".to_string(),
            description: String::new(),
            rating: 4.0,
        }
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            payment_method: "card".to_string(),
            shipping_address: "1 Main St".to_string(),
            billing_address: "1 Main St".to_string(),
        }
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let policy = CheckoutPolicy::default();
        let totals = OrderTotals::compute(Decimal::new(9999, 2), &policy);
        assert_eq!(totals.shipping, Decimal::new(999, 2));
    }

    #[test]
    fn test_free_shipping_at_threshold() {
        let policy = CheckoutPolicy::default();
        let totals = OrderTotals::compute(Decimal::new(100, 0), &policy);
        assert_eq!(totals.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_tax_rounds_to_cents() {
        let policy = CheckoutPolicy::default();
        // 19.98 * 0.08 = 1.5984
        let totals = OrderTotals::compute(Decimal::new(1998, 2), &policy);
        assert_eq!(totals.tax, Decimal::new(160, 2));
        assert_eq!(
            totals.total,
            Decimal::new(1998, 2) + Decimal::new(160, 2) + Decimal::new(999, 2)
        );
    }

    #[test]
    fn test_remaining_for_free_shipping() {
        let policy = CheckoutPolicy::default();
        assert_eq!(
            policy.remaining_for_free_shipping(Decimal::new(80, 0)),
            Some(Decimal::new(20, 0))
        );
        assert_eq!(policy.remaining_for_free_shipping(Decimal::new(100, 0)), None);
        assert_eq!(policy.remaining_for_free_shipping(Decimal::new(120, 0)), None);
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart() {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::default()));
        let orders = OrderService::new(Vec::new());

        let result = place_order(&mut cart, &orders, &CheckoutPolicy::default(), details()).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_place_order_records_and_clears() {
        let mut cart = CartStore::load(Arc::new(MemoryStorage::default()));
        cart.add(&product(1, 999));
        cart.add(&product(1, 999));
        let policy = CheckoutPolicy::default();
        let expected = OrderTotals::compute(cart.total(), &policy);

        let orders = OrderService::new(Vec::new());
        let order = place_order(&mut cart, &orders, &policy, details())
            .await
            .unwrap();

        assert_eq!(order.order_number, "MP-2024-001");
        assert_eq!(order.total, expected.total);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items.first().unwrap().quantity, 2);
        assert!(cart.is_empty());
        assert_eq!(orders.get_all().await.unwrap().len(), 1);
    }
}
