//! Product types.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Customer rating shown on the product card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average stars, in half-star steps (e.g. 4.5).
    pub stars: f32,
    /// Number of ratings.
    pub count: u32,
}

impl Rating {
    /// Path of the star-strip image for this rating, e.g.
    /// `images/ratings/rating-45.png` for 4.5 stars.
    pub fn image_path(&self) -> String {
        let tenths = (self.stars.clamp(0.0, 5.0) * 10.0).round() as u32;
        format!("images/ratings/rating-{}.png", tenths)
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Image path or URL.
    pub image: String,
    /// Product name.
    pub name: String,
    /// Customer rating.
    #[serde(default)]
    pub rating: Rating,
    /// Price in cents.
    pub price_cents: i64,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        image: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            name: name.into(),
            rating: Rating::default(),
            price_cents,
        }
    }

    /// Unit price in the given currency.
    pub fn price(&self, currency: Currency) -> Money {
        Money::new(self.price_cents, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_image_path() {
        let rating = Rating {
            stars: 4.5,
            count: 87,
        };
        assert_eq!(rating.image_path(), "images/ratings/rating-45.png");

        let rating = Rating {
            stars: 4.0,
            count: 1,
        };
        assert_eq!(rating.image_path(), "images/ratings/rating-40.png");
    }

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": "prod1",
            "image": "images/products/socks.jpg",
            "name": "Socks",
            "rating": {"stars": 4.5, "count": 87},
            "priceCents": 1090
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "prod1");
        assert_eq!(product.price_cents, 1090);
        assert_eq!(product.price(Currency::USD).display(), "$10.90");
    }
}
