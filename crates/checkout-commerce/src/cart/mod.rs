//! Shopping cart module.
//!
//! Contains the persisted cart entry type and the store that owns them.

mod item;
mod store;

pub use item::{total_quantity, CartItem, MAX_QUANTITY_PER_ITEM};
pub use store::{CartEvent, CartStore, CART_STORAGE_KEY};
