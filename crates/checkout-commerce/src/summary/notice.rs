//! Transient "Added" markers for product cards.

use crate::ids::ProductId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long the marker stays visible after an add.
pub const ADDED_NOTICE_TTL: Duration = Duration::from_secs(2);

/// Remembers when each product was last added to the cart.
///
/// Purely cosmetic: nothing here feeds back into cart state. Callers pass
/// the current instant so visibility is deterministic in tests.
#[derive(Debug, Clone)]
pub struct AddedNotices {
    shown_at: HashMap<ProductId, Instant>,
    ttl: Duration,
}

impl Default for AddedNotices {
    fn default() -> Self {
        Self::new(ADDED_NOTICE_TTL)
    }
}

impl AddedNotices {
    /// Create a tracker with a custom visibility window.
    pub fn new(ttl: Duration) -> Self {
        Self {
            shown_at: HashMap::new(),
            ttl,
        }
    }

    /// Show the marker for `product_id`, restarting its window.
    pub fn mark(&mut self, product_id: ProductId, now: Instant) {
        self.shown_at.insert(product_id, now);
    }

    /// Check if the marker for `product_id` is still visible at `now`.
    pub fn is_visible(&self, product_id: &ProductId, now: Instant) -> bool {
        self.shown_at
            .get(product_id)
            .is_some_and(|&at| now.saturating_duration_since(at) < self.ttl)
    }
}
