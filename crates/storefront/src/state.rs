//! Application state wiring the catalogs, the order book, and the session
//! stores together.

use std::sync::Arc;

use crate::catalog::{CategoryCatalog, ProductCatalog};
use crate::checkout::{self, CheckoutError, CheckoutPolicy, CustomerDetails};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::orders::{Order, OrderService};
use crate::storage::{FileStorage, Storage};
use crate::store::{CartStore, WishlistStore};

/// Everything a storefront session needs.
///
/// The catalogs and the order book are shared, clonable handles. The cart
/// and wishlist are session state mutated through `&mut self`, so the state
/// itself is owned by one session at a time rather than cloned around.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    products: ProductCatalog,
    categories: CategoryCatalog,
    orders: OrderService,
    cart: CartStore,
    wishlist: WishlistStore,
}

impl AppState {
    /// Build the state from configuration.
    ///
    /// Loads the catalog and order fixtures from `config.fixtures_dir` and
    /// opens file-backed storage under `config.data_dir`, restoring any
    /// persisted cart and wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the product or category fixture cannot be loaded.
    /// A missing order fixture seeds an empty order book, and unreadable
    /// cart or wishlist state falls back to empty.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(&config.data_dir));
        Self::with_storage(config, storage)
    }

    /// Build the state over an explicit storage backend.
    ///
    /// # Errors
    ///
    /// Same as [`AppState::new`].
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, AppError> {
        let products = ProductCatalog::load(&config.fixture_path("products.json"))?;
        let categories = CategoryCatalog::load(&config.fixture_path("categories.json"))?;
        let orders = OrderService::load(&config.fixture_path("orders.json"))?;
        let cart = CartStore::load(Arc::clone(&storage));
        let wishlist = WishlistStore::load(storage);

        Ok(Self {
            config,
            products,
            categories,
            orders,
            cart,
            wishlist,
        })
    }

    /// Load configuration from the environment and build the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a required
    /// fixture cannot be loaded.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(StorefrontConfig::from_env()?)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Pricing rules applied at checkout.
    #[must_use]
    pub fn checkout_policy(&self) -> &CheckoutPolicy {
        &self.config.checkout
    }

    /// Get a handle to the product catalog.
    #[must_use]
    pub fn products(&self) -> &ProductCatalog {
        &self.products
    }

    /// Get a handle to the category catalog.
    #[must_use]
    pub fn categories(&self) -> &CategoryCatalog {
        &self.categories
    }

    /// Get a handle to the order book.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.orders
    }

    /// Read access to the cart.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable access to the cart.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Read access to the wishlist.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    /// Mutable access to the wishlist.
    pub fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    /// Price the cart under the configured policy and place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the order cannot be
    /// recorded. The cart is left untouched on failure.
    pub async fn place_order(&mut self, details: CustomerDetails) -> Result<Order, CheckoutError> {
        checkout::place_order(&mut self.cart, &self.orders, &self.config.checkout, details).await
    }
}
