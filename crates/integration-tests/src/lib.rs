//! Integration tests for Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! The tests are self-contained: each builds its own fixture and data
//! directories under a tempdir, so no external services or setup are
//! needed.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state surviving across sessions
//! - `wishlist_flows` - Saving, toggling, and restoring the wishlist
//! - `checkout_flow` - The full browse, cart, and checkout journey

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use marketplace_storefront::checkout::CheckoutPolicy;
use marketplace_storefront::config::StorefrontConfig;
use marketplace_storefront::state::AppState;
use tempfile::TempDir;

/// Six products across three categories, with ratings straddling the
/// featured cutoff.
const PRODUCTS: &str = r#"[
  {"Id": 1, "name": "Walnut Desk Organizer", "price": "24.99",
   "images": ["/img/walnut-organizer-1.jpg", "/img/walnut-organizer-2.jpg"],
   "category": "office", "description": "Five-slot organizer milled from a single walnut block.",
   "rating": 4.8},
  {"Id": 2, "name": "Brass Desk Lamp", "price": "89.99",
   "images": ["/img/brass-lamp.jpg"],
   "category": "office", "description": "Adjustable lamp with a solid brass arm.",
   "rating": 4.6},
  {"Id": 3, "name": "Ceramic Pour-Over Set", "price": "39.99",
   "images": ["/img/pour-over.jpg"],
   "category": "kitchen", "description": "Dripper, carafe, and two cups in matte stoneware.",
   "rating": 4.9},
  {"Id": 4, "name": "Cast Iron Skillet", "price": "34.99",
   "images": ["/img/skillet.jpg"],
   "category": "kitchen", "description": "Pre-seasoned 10-inch skillet.",
   "rating": 4.2},
  {"Id": 5, "name": "Linen Throw Blanket", "price": "59.99",
   "images": ["/img/linen-throw.jpg"],
   "category": "home", "description": "Stonewashed linen in undyed flax.",
   "rating": 4.7},
  {"Id": 6, "name": "Oak Serving Board", "price": "19.99",
   "images": ["/img/serving-board.jpg"],
   "category": "kitchen", "description": "End-grain oak board with a juice groove.",
   "rating": 3.9}
]"#;

const CATEGORIES: &str = r#"[
  {"Id": 1, "name": "office", "icon": "briefcase", "description": "Desks and desk accessories"},
  {"Id": 2, "name": "kitchen", "icon": "pot", "description": "Cookware and coffee gear"},
  {"Id": 3, "name": "home", "icon": "house", "description": "Textiles and decor"}
]"#;

/// Three seeded orders, so the next created order is `MP-2024-004`.
const ORDERS: &str = r#"[
  {"Id": 1, "orderNumber": "MP-2024-001", "status": "delivered",
   "orderDate": "2024-01-15T10:30:00Z", "total": "36.98",
   "paymentMethod": "card", "shippingAddress": "1 Main St, Springfield",
   "trackingNumber": "TRK-000451",
   "items": [{"productId": 1, "name": "Walnut Desk Organizer", "price": "24.99", "quantity": 1}]},
  {"Id": 2, "orderNumber": "MP-2024-002", "status": "shipped",
   "orderDate": "2024-02-03T18:12:00Z", "total": "53.18",
   "paymentMethod": "card", "shippingAddress": "2 Oak Ave, Shelbyville",
   "trackingNumber": "TRK-000783",
   "items": [{"productId": 3, "name": "Ceramic Pour-Over Set", "price": "39.99", "quantity": 1}]},
  {"Id": 3, "orderNumber": "MP-2024-003", "status": "processing",
   "orderDate": "2024-02-20T09:45:00Z", "total": "140.37",
   "paymentMethod": "paypal", "shippingAddress": "3 Elm Rd, Capital City",
   "items": [{"productId": 2, "name": "Brass Desk Lamp", "price": "89.99", "quantity": 1},
             {"productId": 6, "name": "Oak Serving Board", "price": "19.99", "quantity": 2}]}
]"#;

/// A disposable marketplace: fixture files plus a data directory, both
/// under tempdirs that clean themselves up.
///
/// Build one per test, then open as many sessions against it as the test
/// needs. Sessions opened from the same context share the data directory,
/// which is how cross-session persistence is exercised.
pub struct TestContext {
    fixtures: TempDir,
    data: TempDir,
}

impl TestContext {
    /// Stand up fixture files and an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the tempdirs or fixture files cannot be created; tests
    /// cannot run without them.
    #[must_use]
    pub fn new() -> Self {
        let fixtures = TempDir::new().expect("failed to create temp dir");
        let data = TempDir::new().expect("failed to create temp dir");

        std::fs::write(fixtures.path().join("products.json"), PRODUCTS)
            .expect("failed to write products fixture");
        std::fs::write(fixtures.path().join("categories.json"), CATEGORIES)
            .expect("failed to write categories fixture");
        std::fs::write(fixtures.path().join("orders.json"), ORDERS)
            .expect("failed to write orders fixture");

        Self { fixtures, data }
    }

    /// Configuration pointing at this context's directories.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.data.path().to_path_buf(),
            fixtures_dir: self.fixtures.path().to_path_buf(),
            checkout: CheckoutPolicy::default(),
        }
    }

    /// Open a storefront session against this context.
    ///
    /// # Panics
    ///
    /// Panics if the fixtures fail to load.
    #[must_use]
    pub fn open_session(&self) -> AppState {
        AppState::new(self.config()).expect("failed to build app state")
    }

    /// Path of a persisted storage document, e.g. `cart`.
    #[must_use]
    pub fn storage_path(&self, key: &str) -> PathBuf {
        self.data.path().join(format!("{key}.json"))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
