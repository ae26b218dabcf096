//! Order data access, seeded from a fixture file and mutated in memory.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use marketplace_core::{OrderId, OrderStatus, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub quantity: u32,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: OrderId,
    pub order_number: String,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub total: Decimal,
    pub payment_method: String,
    pub shipping_address: String,
    #[serde(default)]
    pub billing_address: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Input for creating an order.
///
/// The service assigns the id, order number, status, and date.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub total: Decimal,
    pub payment_method: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub items: Vec<OrderLine>,
}

/// Partial update applied by fulfillment flows.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub tracking_number: Option<String>,
}

/// Order data-access errors.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found")]
    NotFound,
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Order book standing in for a remote order backend.
///
/// Seeded orders come from a fixture file; orders placed during the session
/// live only in memory. The service is shared `&self` like a remote client,
/// with an internal lock guarding the book, and hands out clones rather
/// than references.
#[derive(Debug, Clone)]
pub struct OrderService {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl OrderService {
    /// Build the service from already-typed orders.
    #[must_use]
    pub fn new(seed: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(seed)),
        }
    }

    /// Load the order seed from a JSON fixture file.
    ///
    /// A missing file seeds an empty book, so a fresh install works before
    /// any fixtures exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, OrderError> {
        if !path.exists() {
            tracing::info!("Order fixture does not exist yet: {:?}", path);
            return Ok(Self::new(Vec::new()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| OrderError::Io(e.to_string()))?;
        let orders: Vec<Order> =
            serde_json::from_str(&raw).map_err(|e| OrderError::Parse(e.to_string()))?;
        tracing::info!("Loaded {} orders from {:?}", orders.len(), path);
        Ok(Self::new(orders))
    }

    /// Every order in the book, in seed-then-creation order.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed book; the `Result` is part of the
    /// data-access contract.
    pub async fn get_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.read().await.clone())
    }

    /// The order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(OrderError::NotFound)
    }

    /// The order with the given order number (exact match).
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown numbers.
    pub async fn get_by_order_number(&self, order_number: &str) -> Result<Order, OrderError> {
        self.orders
            .read()
            .await
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned()
            .ok_or(OrderError::NotFound)
    }

    /// Place a new order.
    ///
    /// Assigns the next id after the current maximum, numbers the order
    /// `MP-2024-{id:03}`, stamps it as processing at the current time, and
    /// returns the stored order.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed book; the `Result` is part of the
    /// data-access contract.
    pub async fn create(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        let next_id = orders.iter().map(|o| o.id.as_i32()).max().unwrap_or(0) + 1;

        let order = Order {
            id: OrderId::new(next_id),
            order_number: format!("MP-2024-{next_id:03}"),
            status: OrderStatus::Processing,
            order_date: Utc::now(),
            total: draft.total,
            payment_method: draft.payment_method,
            shipping_address: draft.shipping_address,
            billing_address: draft.billing_address,
            tracking_number: None,
            items: draft.items,
        };

        orders.push(order.clone());
        Ok(order)
    }

    /// Apply a partial update to an order and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for unknown ids.
    pub async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or(OrderError::NotFound)?;

        if let Some(status) = update.status {
            order.status = status;
        }
        if let Some(tracking_number) = update.tracking_number {
            order.tracking_number = Some(tracking_number);
        }

        Ok(order.clone())
    }
}
