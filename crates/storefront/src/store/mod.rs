//! Client-side state stores with write-through persistence.
//!
//! Both stores follow the same pattern: an in-memory insertion-ordered list,
//! derived counts recomputed after every mutation, and a synchronous write
//! through to [`crate::storage`] before the mutation returns. They share no
//! state and are composed only in [`crate::state::AppState`].

mod cart;
mod wishlist;

pub use cart::{CartLine, CartStore};
pub use wishlist::WishlistStore;
