//! Marketplace Core - Shared domain types.
//!
//! This crate provides common types used across all Marketplace components:
//! - `storefront` - Cart, wishlist, catalog, and checkout logic
//! - `cli` - Command-line storefront front end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! services. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, quantities, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
