//! The authoritative client-side shopping cart.

use std::fmt;
use std::sync::Arc;

use marketplace_core::{Price, ProductId, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::storage::{Storage, keys};

/// One product entry in the cart with an associated quantity.
///
/// Name, unit price, and image are snapshots taken when the line was
/// created; they are never re-synced against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "Id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    pub image: String,
    pub quantity: Quantity,
}

impl CartLine {
    /// Unit price extended by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price.times(self.quantity.get())
    }
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.images.first().cloned().unwrap_or_default(),
            quantity: Quantity::ONE,
        }
    }
}

/// Write-side shape of the persisted cart document.
///
/// The derived totals are written alongside the lines for the benefit of
/// other readers of the document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedCart<'a> {
    items: &'a [CartLine],
    total: Decimal,
    item_count: u32,
}

/// Read-side shape of the persisted cart document.
///
/// Only the lines are read back; stored totals are never trusted and are
/// recomputed from the lines after every load.
#[derive(Deserialize, Default)]
#[serde(default)]
struct StoredCart {
    items: Vec<CartLine>,
}

/// The authoritative client-side shopping cart.
///
/// Holds an insertion-ordered list of [`CartLine`]s, recomputes the derived
/// item count and total after every mutation, and synchronously writes the
/// state through to storage before the mutation returns. Storage failures
/// are logged and swallowed: the in-memory state stays correct and is
/// written again on the next mutation.
pub struct CartStore {
    storage: Arc<dyn Storage>,
    items: Vec<CartLine>,
    item_count: u32,
    total: Decimal,
}

impl CartStore {
    /// Create the store from persisted state.
    ///
    /// A missing document, an unreadable backend, or JSON that fails the
    /// typed conversion all fall back to an empty cart; none of these are
    /// surfaced to the caller.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items = match storage.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredCart>(&raw) {
                Ok(stored) => stored.items,
                Err(e) => {
                    tracing::warn!("Discarding unreadable cart document: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read cart from storage: {e}");
                Vec::new()
            }
        };

        let mut store = Self {
            storage,
            items,
            item_count: 0,
            total: Decimal::ZERO,
        };
        store.recompute();
        store
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub const fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Sum of unit price times quantity across all lines.
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of a product.
    ///
    /// An existing line gains one unit, saturating at [`Quantity::MAX`];
    /// otherwise a new line is appended with quantity 1, snapshotting the
    /// product's price and first image. Always succeeds.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(CartLine::from(product));
        }
        self.commit();
    }

    /// Delete a product's line entirely. No-op when absent.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|line| line.id != id);
        self.commit();
    }

    /// Set the quantity of a product's line.
    ///
    /// Requests of zero or less remove the line; requests above the cap are
    /// clamped down to [`Quantity::MAX`]. Unknown ids are a no-op.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        match Quantity::clamped(quantity) {
            Some(quantity) => {
                if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
                    line.quantity = quantity;
                }
            }
            None => self.items.retain(|line| line.id != id),
        }
        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Recompute derived totals and write the state through to storage.
    fn commit(&mut self) {
        self.recompute();
        let document = PersistedCart {
            items: &self.items,
            total: self.total,
            item_count: self.item_count,
        };
        match serde_json::to_string(&document) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(keys::CART, &raw) {
                    tracing::warn!("Failed to persist cart: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize cart: {e}"),
        }
    }

    fn recompute(&mut self) {
        self.item_count = self.items.iter().map(|line| line.quantity.get()).sum();
        self.total = self.items.iter().map(CartLine::line_total).sum();
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("item_count", &self.item_count)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
