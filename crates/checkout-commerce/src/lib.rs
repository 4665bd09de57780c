//! Cart and checkout core for the storefront.
//!
//! This crate provides the state behind the cart and checkout pages:
//!
//! - **Catalog**: Products and delivery options, read-only
//! - **Cart**: The cart store, sole owner of cart mutation and persistence
//! - **Summary**: Order summary and product grid view models
//!
//! # Example
//!
//! ```rust,ignore
//! use checkout_commerce::prelude::*;
//! use checkout_cache::{Cache, FileStore};
//!
//! let catalog = Catalog::builtin()?;
//! let mut cart = CartStore::open(Cache::new(FileStore::open(".checkout")?))?;
//!
//! cart.add_to_cart(&ProductId::new("prod1"), 2)?;
//!
//! let summary = OrderSummaryBuilder::new(&catalog).build(cart.items(), today)?;
//! println!("Total: {}", summary.payment.order_total.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod summary;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_money, Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_money, Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, DeliveryOption, Product, Rating};

    // Cart
    pub use crate::cart::{CartEvent, CartItem, CartStore};

    // Summary
    pub use crate::summary::{
        AddedNotices, DeliveryChoice, OrderSummary, OrderSummaryBuilder, PaymentSummary,
        ProductCard, ProductGrid, SummaryFault, SummaryRow,
    };
}
