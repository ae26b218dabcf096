//! The deduplicated set of saved products.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use marketplace_core::ProductId;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::storage::{Storage, keys};

/// Write-side shape of the persisted wishlist document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedWishlist<'a> {
    items: &'a [Product],
    last_updated: DateTime<Utc>,
}

/// Read-side shape of the persisted wishlist document.
///
/// `lastUpdated` is optional so documents written before the timestamp was
/// recorded still load; the item count is always derived from the items and
/// never read back.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredWishlist {
    items: Vec<Product>,
    last_updated: Option<DateTime<Utc>>,
}

/// A deduplicated, insertion-ordered set of saved product snapshots.
///
/// Snapshots are taken when a product is saved and never re-synced against
/// the catalog. Every mutation writes the state through to storage with the
/// same swallow-on-failure policy as the cart.
pub struct WishlistStore {
    storage: Arc<dyn Storage>,
    items: Vec<Product>,
    last_updated: Option<DateTime<Utc>>,
}

impl WishlistStore {
    /// Create the store from persisted state, falling back to an empty
    /// wishlist when the document is missing or unreadable.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let stored = match storage.get(keys::WISHLIST) {
            Ok(Some(raw)) => match serde_json::from_str::<StoredWishlist>(&raw) {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!("Discarding unreadable wishlist document: {e}");
                    StoredWishlist::default()
                }
            },
            Ok(None) => StoredWishlist::default(),
            Err(e) => {
                tracing::warn!("Failed to read wishlist from storage: {e}");
                StoredWishlist::default()
            }
        };

        Self {
            storage,
            items: stored.items,
            last_updated: stored.last_updated,
        }
    }

    /// Saved products in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is saved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a product is currently saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// When the wishlist last persisted a mutation, if known.
    #[must_use]
    pub const fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Save a product snapshot.
    ///
    /// A product that is already saved leaves the wishlist untouched; the
    /// no-op does not rewrite storage.
    pub fn add(&mut self, product: &Product) {
        if self.contains(product.id) {
            return;
        }
        self.items.push(product.clone());
        self.commit();
    }

    /// Remove a saved product. No-op when absent.
    pub fn remove(&mut self, id: ProductId) {
        self.items.retain(|item| item.id != id);
        self.commit();
    }

    /// Flip a product's membership: saved products are removed, unsaved ones
    /// are added. Backs a single heart-icon control in front ends.
    pub fn toggle(&mut self, product: &Product) {
        if self.contains(product.id) {
            self.items.retain(|item| item.id != product.id);
        } else {
            self.items.push(product.clone());
        }
        self.commit();
    }

    /// Remove every saved product.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Write the state through to storage, refreshing the timestamp.
    fn commit(&mut self) {
        let now = Utc::now();
        self.last_updated = Some(now);
        let document = PersistedWishlist {
            items: &self.items,
            last_updated: now,
        };
        match serde_json::to_string(&document) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(keys::WISHLIST, &raw) {
                    tracing::warn!("Failed to persist wishlist: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize wishlist: {e}"),
        }
    }
}

impl fmt::Debug for WishlistStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistStore")
            .field("items", &self.items)
            .field("last_updated", &self.last_updated)
            .finish_non_exhaustive()
    }
}
