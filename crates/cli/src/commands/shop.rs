//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! # List the whole catalog
//! mp-cli shop list
//!
//! # Search and drill into a product
//! mp-cli shop search walnut
//! mp-cli shop show 3
//! ```

use marketplace_core::ProductId;
use marketplace_storefront::catalog::{DEFAULT_RECOMMENDED, Product};
use marketplace_storefront::state::AppState;
use tracing::info;

fn print_products(products: &[Product]) {
    for product in products {
        info!(
            "  [{}] {} ({}) - {}",
            product.id, product.name, product.price, product.category
        );
    }
}

/// List every product in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn list(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.products().get_all().await?;
    info!("{} products", products.len());
    print_products(&products);
    Ok(())
}

/// List the featured products.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn featured(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.products().get_featured().await?;
    info!("{} featured products", products.len());
    print_products(&products);
    Ok(())
}

/// List the categories.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn categories(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let categories = state.categories().get_all().await?;
    info!("{} categories", categories.len());
    for category in &categories {
        if category.description.is_empty() {
            info!("  {}", category.name);
        } else {
            info!("  {} - {}", category.name, category.description);
        }
    }
    Ok(())
}

/// List the products in a category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn category(state: &AppState, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.products().get_by_category(name).await?;
    info!("{} products in {name}", products.len());
    print_products(&products);
    Ok(())
}

/// Search products by name, description, or category.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read.
pub async fn search(state: &AppState, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let products = state.products().search(query).await?;
    info!("{} products match {query:?}", products.len());
    print_products(&products);
    Ok(())
}

/// Show one product in full, along with recommendations from its category.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub async fn show(state: &AppState, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.products().get_by_id(ProductId::new(id)).await?;

    info!("{} ({})", product.name, product.price);
    info!("  Category: {}", product.category);
    info!("  Rating: {:.1}", product.rating);
    if !product.description.is_empty() {
        info!("  {}", product.description);
    }

    let recommended = state
        .products()
        .get_recommended(product.id, DEFAULT_RECOMMENDED)
        .await?;
    if !recommended.is_empty() {
        info!("Goes well with:");
        print_products(&recommended);
    }

    Ok(())
}
