//! Cart entry type and persisted-state validation.

use crate::catalog::DEFAULT_DELIVERY_OPTION_ID;
use crate::ids::{DeliveryOptionId, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum quantity allowed per cart entry.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// One line in the cart, keyed by product.
///
/// Serialized as `{"productId", "quantity", "deliveryOptionId"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredCartItem")]
pub struct CartItem {
    /// Product in the catalog.
    pub product_id: ProductId,
    /// Units of the product, always in `1..=MAX_QUANTITY_PER_ITEM`.
    pub quantity: i64,
    /// Selected delivery tier.
    pub delivery_option_id: DeliveryOptionId,
}

/// Persisted entry as older and current storefronts wrote it.
///
/// `deliveryOptionId` wins over the legacy `deliveryOptions` when both are
/// present; with neither, the default option is used.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCartItem {
    product_id: ProductId,
    quantity: i64,
    delivery_option_id: Option<DeliveryOptionId>,
    delivery_options: Option<DeliveryOptionId>,
}

impl From<StoredCartItem> for CartItem {
    fn from(stored: StoredCartItem) -> Self {
        Self {
            product_id: stored.product_id,
            quantity: stored.quantity,
            delivery_option_id: stored
                .delivery_option_id
                .or(stored.delivery_options)
                .unwrap_or_else(default_delivery_option_id),
        }
    }
}

impl CartItem {
    /// Create an entry with the default delivery option.
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
            delivery_option_id: default_delivery_option_id(),
        }
    }
}

/// Sum of quantities across entries; the cart badge value.
///
/// Saturates instead of overflowing.
pub fn total_quantity(items: &[CartItem]) -> i64 {
    items
        .iter()
        .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
}

fn default_delivery_option_id() -> DeliveryOptionId {
    DeliveryOptionId::new(DEFAULT_DELIVERY_OPTION_ID)
}

/// Check the invariants a stored cart must hold.
pub(crate) fn validate_items(items: &[CartItem]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.product_id.is_empty() {
            return Err("entry with empty productId".to_string());
        }
        if !(1..=MAX_QUANTITY_PER_ITEM).contains(&item.quantity) {
            return Err(format!(
                "quantity {} for {} out of range",
                item.quantity, item.product_id
            ));
        }
        if !seen.insert(&item.product_id) {
            return Err(format!("duplicate entry for {}", item.product_id));
        }
    }
    Ok(())
}

/// Parse and validate a persisted cart.
///
/// Anything other than a valid list of entries yields `Err` with a reason.
pub(crate) fn parse_items(bytes: &[u8]) -> Result<Vec<CartItem>, String> {
    let items: Vec<CartItem> = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
    validate_items(&items)?;
    Ok(items)
}
