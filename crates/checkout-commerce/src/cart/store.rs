//! The cart store: sole owner of cart mutation and persistence.

use crate::cart::item::{parse_items, total_quantity, CartItem, MAX_QUANTITY_PER_ITEM};
use crate::catalog::DeliveryOption;
use crate::error::CommerceError;
use crate::ids::{DeliveryOptionId, ProductId};
use checkout_cache::{Cache, Store};
use serde::Serialize;
use std::fmt;

/// Key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new entry was appended.
    Added { product_id: ProductId, quantity: i64 },
    /// An existing entry's quantity was increased.
    Merged { product_id: ProductId, quantity: i64 },
    /// An entry was removed.
    Removed { product_id: ProductId, quantity: i64 },
    /// An entry's quantity was overwritten.
    QuantityChanged {
        product_id: ProductId,
        from: i64,
        to: i64,
    },
    /// An entry's delivery option was changed.
    DeliveryOptionChanged {
        product_id: ProductId,
        delivery_option_id: DeliveryOptionId,
    },
    /// Every entry was removed.
    Cleared { removed: usize },
    /// Nothing to do; storage was not touched.
    Unchanged,
}

impl CartEvent {
    /// Check if the cart was modified.
    pub fn is_change(&self) -> bool {
        !matches!(self, CartEvent::Unchanged)
    }
}

type Subscriber = Box<dyn FnMut(&CartEvent, &[CartItem])>;

/// Cart entries plus the cache they are persisted to.
///
/// Constructed once per process with [`CartStore::load`]. Every committed
/// mutation writes the full entry list under the store's key before it
/// becomes visible in memory, then notifies subscribers.
pub struct CartStore<S> {
    cache: Cache<S>,
    key: String,
    items: Vec<CartItem>,
    subscribers: Vec<Subscriber>,
}

impl<S: Store> CartStore<S> {
    /// Load the cart stored under [`CART_STORAGE_KEY`].
    pub fn open(cache: Cache<S>) -> Result<Self, CommerceError> {
        Self::load(cache, CART_STORAGE_KEY)
    }

    /// Load the cart stored under `key`.
    ///
    /// A missing, unparseable or invalid value yields an empty cart. Only a
    /// failure of the store itself is returned as an error.
    pub fn load(cache: Cache<S>, key: impl Into<String>) -> Result<Self, CommerceError> {
        let key = key.into();
        let items = match cache.get_raw(&key)? {
            None => Vec::new(),
            Some(bytes) => parse_items(&bytes).unwrap_or_else(|reason| {
                tracing::warn!(key = %key, %reason, "discarding malformed persisted cart");
                Vec::new()
            }),
        };
        tracing::debug!(key = %key, entries = items.len(), "cart loaded");

        Ok(Self {
            cache,
            key,
            items,
            subscribers: Vec::new(),
        })
    }

    /// Register a callback run after every committed mutation.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&CartEvent, &[CartItem]) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Add units of a product.
    ///
    /// Merges into the existing entry for the product if there is one,
    /// otherwise appends a new entry with the default delivery option.
    pub fn add_to_cart(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartEvent, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        let mut next = self.items.clone();
        let event = if let Some(existing) = next.iter_mut().find(|i| &i.product_id == product_id)
        {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_limit(new_quantity)?;
            existing.quantity = new_quantity;
            CartEvent::Merged {
                product_id: product_id.clone(),
                quantity: new_quantity,
            }
        } else {
            check_limit(quantity)?;
            next.push(CartItem::new(product_id.clone(), quantity));
            CartEvent::Added {
                product_id: product_id.clone(),
                quantity,
            }
        };

        self.commit(next, event)
    }

    /// Remove the entry for a product. No-op if absent.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<CartEvent, CommerceError> {
        let Some(existing) = self.get(product_id) else {
            return Ok(CartEvent::Unchanged);
        };
        let event = CartEvent::Removed {
            product_id: product_id.clone(),
            quantity: existing.quantity,
        };

        let next = self
            .items
            .iter()
            .filter(|i| &i.product_id != product_id)
            .cloned()
            .collect();
        self.commit(next, event)
    }

    /// Overwrite the quantity of an entry. No-op if absent.
    ///
    /// Non-positive quantities are rejected and the prior value is kept.
    pub fn update_cart_item_quantity(
        &mut self,
        product_id: &ProductId,
        new_quantity: i64,
    ) -> Result<CartEvent, CommerceError> {
        if new_quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(new_quantity));
        }
        check_limit(new_quantity)?;

        let mut next = self.items.clone();
        let Some(item) = next.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(CartEvent::Unchanged);
        };
        if item.quantity == new_quantity {
            return Ok(CartEvent::Unchanged);
        }

        let event = CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            from: item.quantity,
            to: new_quantity,
        };
        item.quantity = new_quantity;
        self.commit(next, event)
    }

    /// Select a delivery option for an entry. No-op if absent.
    pub fn update_delivery_option(
        &mut self,
        product_id: &ProductId,
        option: &DeliveryOption,
    ) -> Result<CartEvent, CommerceError> {
        let mut next = self.items.clone();
        let Some(item) = next.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(CartEvent::Unchanged);
        };
        if item.delivery_option_id == option.id {
            return Ok(CartEvent::Unchanged);
        }

        item.delivery_option_id = option.id.clone();
        let event = CartEvent::DeliveryOptionChanged {
            product_id: product_id.clone(),
            delivery_option_id: option.id.clone(),
        };
        self.commit(next, event)
    }

    /// Remove every entry and persist the empty cart.
    pub fn clear(&mut self) -> Result<CartEvent, CommerceError> {
        let event = CartEvent::Cleared {
            removed: self.items.len(),
        };
        self.commit(Vec::new(), event)
    }

    /// Entries in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Entry for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities; the figure shown on the cart badge.
    pub fn total_quantity(&self) -> i64 {
        total_quantity(&self.items)
    }

    /// Storage key of this cart.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Persist `next`, then make it the current state.
    fn commit(&mut self, next: Vec<CartItem>, event: CartEvent) -> Result<CartEvent, CommerceError> {
        self.cache.set(&self.key, &next)?;
        self.items = next;
        tracing::debug!(
            key = %self.key,
            entries = self.items.len(),
            ?event,
            "cart persisted"
        );

        for subscriber in &mut self.subscribers {
            subscriber(&event, &self.items);
        }
        Ok(event)
    }
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}
