//! CLI command implementations.

pub mod cart;
pub mod orders;
pub mod shop;
pub mod wishlist;
