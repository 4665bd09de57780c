//! Type-safe key-value layer for the checkout cart.
//!
//! Provides a small byte-level [`Store`] trait with two backends and a typed
//! [`Cache`] facade that serializes values as JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use checkout_cache::{Cache, FileStore};
//!
//! let cache = Cache::new(FileStore::open(".checkout")?);
//!
//! // Store a value
//! cache.set("cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<Item>> = cache.get("cart")?;
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
