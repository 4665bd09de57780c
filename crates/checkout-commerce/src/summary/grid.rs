//! Product grid for the storefront page.

use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::summary::AddedNotices;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::time::Instant;

/// Quantities offered by a card's quantity selector.
pub const QUANTITY_CHOICES: RangeInclusive<i64> = 1..=10;

/// One product as shown in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub rating_image: String,
    pub rating_count: u32,
    pub price_label: String,
    pub quantity_choices: Vec<i64>,
    /// Whether the "Added" marker is showing.
    pub added: bool,
}

/// View model for the storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductGrid {
    pub cards: Vec<ProductCard>,
    /// Cart badge value.
    pub cart_quantity: i64,
}

impl ProductGrid {
    /// Build one card per catalog product, in catalog order.
    pub fn build(
        catalog: &Catalog,
        currency: Currency,
        cart_quantity: i64,
        notices: &AddedNotices,
        now: Instant,
    ) -> Self {
        let cards = catalog
            .products()
            .iter()
            .map(|product| ProductCard {
                product_id: product.id.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
                rating_image: product.rating.image_path(),
                rating_count: product.rating.count,
                price_label: product.price(currency).display(),
                quantity_choices: QUANTITY_CHOICES.collect(),
                added: notices.is_visible(&product.id, now),
            })
            .collect();

        Self {
            cards,
            cart_quantity,
        }
    }

    /// Card for a product.
    pub fn card(&self, product_id: &ProductId) -> Option<&ProductCard> {
        self.cards.iter().find(|c| &c.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_lists_catalog_in_order() {
        let catalog = Catalog::builtin().unwrap();
        let grid = ProductGrid::build(
            &catalog,
            Currency::USD,
            0,
            &AddedNotices::default(),
            Instant::now(),
        );

        assert_eq!(grid.cards.len(), catalog.products().len());
        let first = &grid.cards[0];
        assert_eq!(first.price_label, "$10.90");
        assert_eq!(first.rating_image, "images/ratings/rating-45.png");
        assert_eq!(first.rating_count, 87);
        assert_eq!(first.quantity_choices, (1..=10).collect::<Vec<i64>>());
        assert!(!first.added);
    }

    #[test]
    fn test_grid_marks_recent_adds() {
        let catalog = Catalog::builtin().unwrap();
        let ball = ProductId::new("15b6fc6f-327a-4ec4-896f-486349e85a3d");
        let now = Instant::now();
        let mut notices = AddedNotices::default();
        notices.mark(ball.clone(), now);

        let grid = ProductGrid::build(&catalog, Currency::USD, 3, &notices, now);

        assert!(grid.card(&ball).unwrap().added);
        assert_eq!(grid.cards.iter().filter(|c| c.added).count(), 1);
        assert_eq!(grid.cart_quantity, 3);
    }
}
