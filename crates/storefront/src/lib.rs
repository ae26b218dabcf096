//! Marketplace storefront library.
//!
//! This crate provides the storefront functionality as a library: the
//! product and category catalogs, the order book, cart and wishlist session
//! stores, and the checkout flow that ties them together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod orders;
pub mod state;
pub mod storage;
pub mod store;
