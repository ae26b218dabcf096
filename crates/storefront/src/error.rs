//! Unified error handling for the storefront.
//!
//! Provides a unified `AppError` type for callers that wire several
//! subsystems together, such as application startup and the CLI. Individual
//! modules keep their own error enums; this is the roll-up.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog fixture loading or lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order lookup or recording failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Checkout was rejected.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
