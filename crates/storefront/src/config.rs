//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults give a working local setup.
//!
//! - `MARKETPLACE_DATA_DIR` - Directory for persisted cart/wishlist state
//!   (default: `data`)
//! - `MARKETPLACE_FIXTURES_DIR` - Directory holding `products.json`,
//!   `categories.json`, and `orders.json` (default: `fixtures`)
//! - `MARKETPLACE_TAX_RATE` - Sales tax applied at checkout, as a fraction
//!   (default: `0.08`)
//! - `MARKETPLACE_FREE_SHIPPING_THRESHOLD` - Subtotal at which shipping
//!   becomes free (default: `100`)
//! - `MARKETPLACE_FLAT_SHIPPING` - Shipping charge below the threshold
//!   (default: `9.99`)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::CheckoutPolicy;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the key-value store writes cart/wishlist state under
    pub data_dir: PathBuf,
    /// Directory holding the catalog and order seed fixtures
    pub fixtures_dir: PathBuf,
    /// Tax and shipping rules applied at checkout
    pub checkout: CheckoutPolicy,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse or
    /// validate (for example a negative tax rate).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("MARKETPLACE_DATA_DIR", "data"));
        let fixtures_dir = PathBuf::from(get_env_or_default("MARKETPLACE_FIXTURES_DIR", "fixtures"));
        let checkout = checkout_policy_from_env()?;

        Ok(Self {
            data_dir,
            fixtures_dir,
            checkout,
        })
    }

    /// Path to one of the fixture files, e.g. `products.json`.
    #[must_use]
    pub fn fixture_path(&self, file_name: &str) -> PathBuf {
        self.fixtures_dir.join(file_name)
    }
}

/// Build the checkout policy, overriding defaults from the environment.
fn checkout_policy_from_env() -> Result<CheckoutPolicy, ConfigError> {
    let defaults = CheckoutPolicy::default();

    let tax_rate = get_decimal_env("MARKETPLACE_TAX_RATE", defaults.tax_rate)?;
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            "MARKETPLACE_TAX_RATE".to_string(),
            format!("must be a fraction between 0 and 1, got {tax_rate}"),
        ));
    }

    let free_shipping_threshold = get_decimal_env(
        "MARKETPLACE_FREE_SHIPPING_THRESHOLD",
        defaults.free_shipping_threshold,
    )?;
    if free_shipping_threshold < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            "MARKETPLACE_FREE_SHIPPING_THRESHOLD".to_string(),
            format!("must not be negative, got {free_shipping_threshold}"),
        ));
    }

    let flat_shipping = get_decimal_env("MARKETPLACE_FLAT_SHIPPING", defaults.flat_shipping)?;
    if flat_shipping < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            "MARKETPLACE_FLAT_SHIPPING".to_string(),
            format!("must not be negative, got {flat_shipping}"),
        ));
    }

    Ok(CheckoutPolicy {
        tax_rate,
        free_shipping_threshold,
        flat_shipping,
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional decimal environment variable, falling back to a default.
fn get_decimal_env(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
