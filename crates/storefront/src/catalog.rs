//! Fixture-backed product and category data access.
//!
//! Catalog records load once at startup from JSON fixture files and are held
//! in memory behind `Arc`s, standing in for a remote catalog backend. The
//! accessors keep the async, fallible contract the presentation layer codes
//! against, so the stores and command layer never assume the catalog is
//! local.

use std::path::Path;
use std::sync::Arc;

use marketplace_core::{CategoryId, Price, ProductId};
use serde::{Deserialize, Serialize};

/// Products with at least this rating qualify as featured.
const FEATURED_MIN_RATING: f32 = 4.5;
/// At most this many products appear in the featured set.
const FEATURED_LIMIT: usize = 8;
/// Default number of recommendations when callers have no preference.
pub const DEFAULT_RECOMMENDED: usize = 4;

/// A catalog product record.
///
/// This is the one typed shape product data takes inside the application;
/// looser upstream shapes (fixture rows, persisted snapshots) are converted
/// into it at the edges, with optional fields defaulting rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rating: f32,
}

/// A catalog category record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

/// Catalog loading and lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Product catalog held in memory.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: Arc<Vec<Product>>,
}

impl ProductCatalog {
    /// Build a catalog from already-typed records.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(products),
        }
    }

    /// Load the catalog from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// product array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        tracing::info!("Loaded {} products from {:?}", products.len(), path);
        Ok(Self::new(products))
    }

    fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

// The catalog is in-memory, but callers code against an async data-access
// contract.
#[allow(clippy::unused_async)]
impl ProductCatalog {
    /// Every product in the catalog.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed catalog; the `Result` is part of
    /// the data-access contract.
    pub async fn get_all(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.as_ref().clone())
    }

    /// The product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.find(id)
            .cloned()
            .ok_or(CatalogError::NotFound("Product"))
    }

    /// Products in a category, matched by name case-insensitively.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed catalog.
    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let category = category.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.category.to_lowercase() == category)
            .cloned()
            .collect())
    }

    /// The highest-rated products, capped at the featured limit.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed catalog.
    pub async fn get_featured(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.rating >= FEATURED_MIN_RATING)
            .take(FEATURED_LIMIT)
            .cloned()
            .collect())
    }

    /// Case-insensitive substring search over name, description, and
    /// category. An empty query matches everything.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let query = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }

    /// Products from the same category as `id`, excluding the product
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if `id` is unknown.
    pub async fn get_recommended(
        &self,
        id: ProductId,
        limit: usize,
    ) -> Result<Vec<Product>, CatalogError> {
        let product = self.find(id).ok_or(CatalogError::NotFound("Product"))?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.category == product.category && p.id != id)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Category catalog held in memory.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Arc<Vec<Category>>,
}

impl CategoryCatalog {
    /// Build a catalog from already-typed records.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(categories),
        }
    }

    /// Load the catalog from a JSON fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse as a
    /// category array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let categories: Vec<Category> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        tracing::info!("Loaded {} categories from {:?}", categories.len(), path);
        Ok(Self::new(categories))
    }
}

// Same async contract as the product catalog.
#[allow(clippy::unused_async)]
impl CategoryCatalog {
    /// Every category in the catalog.
    ///
    /// # Errors
    ///
    /// Infallible for the fixture-backed catalog.
    pub async fn get_all(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.as_ref().clone())
    }

    /// The category with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound("Category"))
    }

    /// The category with the given name, matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown names.
    pub async fn get_by_name(&self, name: &str) -> Result<Category, CatalogError> {
        let name = name.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.name.to_lowercase() == name)
            .cloned()
            .ok_or(CatalogError::NotFound("Category"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn product(id: i32, name: &str, category: &str, rating: f32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(1999),
            images: vec!["hero.png".to_string()],
            category: category.to_string(),
            description: format!("{name} for every home"),
            rating,
        }
    }

    fn sample_catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            product(1, "Wireless Headphones", "Electronics", 4.8),
            product(2, "Ceramic Planter", "Home & Garden", 4.2),
            product(3, "Smart Speaker", "Electronics", 4.6),
            product(4, "Desk Lamp", "Electronics", 3.9),
        ])
    }

    #[tokio::test]
    async fn test_get_all_returns_every_product() {
        let catalog = sample_catalog();
        assert_eq!(catalog.get_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let catalog = sample_catalog();
        let found = catalog.get_by_id(ProductId::new(2)).await.unwrap();
        assert_eq!(found.name, "Ceramic Planter");

        let missing = catalog.get_by_id(ProductId::new(99)).await;
        assert_eq!(missing.unwrap_err().to_string(), "Product not found");
    }

    #[tokio::test]
    async fn test_get_by_category_is_case_insensitive() {
        let catalog = sample_catalog();
        let electronics = catalog.get_by_category("eLeCtRoNiCs").await.unwrap();
        assert_eq!(electronics.len(), 3);

        let none = catalog.get_by_category("Toys").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_featured_filters_by_rating() {
        let catalog = sample_catalog();
        let featured = catalog.get_featured().await.unwrap();

        let names: Vec<&str> = featured.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Wireless Headphones", "Smart Speaker"]);
    }

    #[tokio::test]
    async fn test_search_matches_name_description_and_category() {
        let catalog = sample_catalog();

        let by_name = catalog.search("headphones").await.unwrap();
        assert_eq!(by_name.len(), 1);

        let by_category = catalog.search("garden").await.unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category.first().unwrap().name, "Ceramic Planter");

        let by_description = catalog.search("every home").await.unwrap();
        assert_eq!(by_description.len(), 4);
    }

    #[tokio::test]
    async fn test_search_empty_query_matches_everything() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_get_recommended_same_category_excluding_self() {
        let catalog = sample_catalog();
        let recommended = catalog
            .get_recommended(ProductId::new(1), DEFAULT_RECOMMENDED)
            .await
            .unwrap();

        let ids: Vec<i32> = recommended.iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn test_get_recommended_unknown_product_fails() {
        let catalog = sample_catalog();
        assert!(
            catalog
                .get_recommended(ProductId::new(99), DEFAULT_RECOMMENDED)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_category_lookup_by_name() {
        let catalog = CategoryCatalog::new(vec![Category {
            id: CategoryId::new(1),
            name: "Electronics".to_string(),
            icon: "Monitor".to_string(),
            description: String::new(),
        }]);

        let found = catalog.get_by_name("electronics").await.unwrap();
        assert_eq!(found.id, CategoryId::new(1));

        let missing = catalog.get_by_name("toys").await;
        assert_eq!(missing.unwrap_err().to_string(), "Category not found");
    }

    #[test]
    fn test_load_parses_fixture_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Id":1,"name":"Wireless Headphones","price":"79.99","images":["a.png"],"category":"Electronics","description":"Noise cancelling","rating":4.8}}]"#
        )
        .unwrap();

        let catalog = ProductCatalog::load(file.path()).unwrap();
        let products = catalog.products.as_ref();
        assert_eq!(products.len(), 1);
        assert_eq!(products.first().unwrap().price, Price::from_cents(7999));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ProductCatalog::load(Path::new("no/such/fixtures.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_load_malformed_fixture_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not an array}}").unwrap();

        let err = ProductCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_lenient_fixture_defaults() {
        // Rows missing optional fields still convert into typed records.
        let product: Product =
            serde_json::from_str(r#"{"Id":5,"name":"Bare","price":"1.00"}"#).unwrap();
        assert!(product.images.is_empty());
        assert_eq!(product.category, "");
        assert!(product.rating.abs() < f32::EPSILON);
    }
}
