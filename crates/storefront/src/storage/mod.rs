//! Durable local key-value storage.
//!
//! The cart and wishlist stores write their state through this layer after
//! every mutation: one JSON document per fixed key. The trait is deliberately
//! string-in/string-out; typed (de)serialization happens at the store
//! boundary, so a corrupt document degrades to an empty store instead of
//! poisoning the storage layer.

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Fixed namespaces the stores persist under.
pub mod keys {
    /// Cart state document.
    pub const CART: &str = "cart";
    /// Wishlist state document.
    pub const WISHLIST: &str = "marketplace_wishlist";
}

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters outside the namespace alphabet.
    #[error("invalid storage key {0:?}: keys must match [A-Za-z0-9_-]+")]
    InvalidKey(String),

    /// Underlying filesystem failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable string key-value storage backing the client-side stores.
///
/// Implementations must tolerate repeated writes to the same key (last write
/// wins) and treat reads and deletes of absent keys as non-errors.
pub trait Storage: Send + Sync {
    /// Fetch the raw value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails; an absent
    /// key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend fails; deleting
    /// an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Check a key against the namespace alphabet.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_namespaces() {
        assert!(validate_key(keys::CART).is_ok());
        assert!(validate_key(keys::WISHLIST).is_ok());
        assert!(validate_key("snake_case-and-123").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_like_keys() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("nested/key").is_err());
        assert!(validate_key("spaced key").is_err());
    }
}
