//! Render-ready view models.
//!
//! - [`OrderSummaryBuilder`] joins cart entries with the catalog for the checkout page.
//! - [`ProductGrid`] lists the catalog for the storefront page.
//! - [`AddedNotices`] drives the transient "Added" marker on product cards.

mod grid;
mod notice;
mod order;

pub use grid::{ProductCard, ProductGrid, QUANTITY_CHOICES};
pub use notice::{AddedNotices, ADDED_NOTICE_TTL};
pub use order::{
    DeliveryChoice, OrderSummary, OrderSummaryBuilder, PaymentSummary, SummaryFault, SummaryRow,
};
