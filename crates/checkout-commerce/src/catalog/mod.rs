//! Product catalog module.
//!
//! A read-only table of products and delivery options, loaded once at start.

mod delivery;
mod product;

pub use delivery::{
    DeliveryOption, DEFAULT_DELIVERY_OPTION_ID, DELIVERY_DATE_FORMAT, FREE_LABEL,
};
pub use product::{Product, Rating};

use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::error::CommerceError;
use crate::ids::{DeliveryOptionId, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Highest accepted price, so a full line of one product always fits in an `i64`.
pub const MAX_PRICE_CENTS: i64 = i64::MAX / MAX_QUANTITY_PER_ITEM;

/// On-disk layout of a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub delivery_options: Vec<DeliveryOption>,
}

/// Validated product and delivery-option tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    delivery_options: Vec<DeliveryOption>,
    default_option: usize,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, prices outside
    /// `0..=MAX_PRICE_CENTS`, and a missing default delivery option.
    pub fn new(
        products: Vec<Product>,
        delivery_options: Vec<DeliveryOption>,
    ) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if !valid_price(product.price_cents) {
                return Err(CommerceError::InvalidPrice {
                    id: product.id.to_string(),
                    price_cents: product.price_cents,
                });
            }
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
        }

        let mut seen = HashSet::with_capacity(delivery_options.len());
        for option in &delivery_options {
            if !valid_price(option.price_cents) {
                return Err(CommerceError::InvalidPrice {
                    id: option.id.to_string(),
                    price_cents: option.price_cents,
                });
            }
            if !seen.insert(&option.id) {
                return Err(CommerceError::DuplicateDeliveryOption(option.id.to_string()));
            }
        }
        let default_option = delivery_options
            .iter()
            .position(|o| o.id.as_str() == DEFAULT_DELIVERY_OPTION_ID)
            .ok_or_else(|| {
                CommerceError::DeliveryOptionNotFound(DEFAULT_DELIVERY_OPTION_ID.to_string())
            })?;

        Ok(Self {
            products,
            index,
            delivery_options,
            default_option,
        })
    }

    /// The storefront's starter catalog.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, CommerceError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data.products, data.delivery_options)
    }

    /// Read a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CommerceError::CatalogLoad {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            products = catalog.products.len(),
            delivery_options = catalog.delivery_options.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Look up a product.
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Look up a product that must exist.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.find_by_id(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Check if a product exists.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All delivery options, in catalog order.
    pub fn delivery_options(&self) -> &[DeliveryOption] {
        &self.delivery_options
    }

    /// Look up a delivery option.
    pub fn delivery_option(&self, id: &DeliveryOptionId) -> Option<&DeliveryOption> {
        self.delivery_options.iter().find(|o| &o.id == id)
    }

    /// The option new cart entries start with.
    pub fn default_delivery_option(&self) -> &DeliveryOption {
        // `new` guarantees the index is in bounds.
        &self.delivery_options[self.default_option]
    }
}

fn valid_price(price_cents: i64) -> bool {
    (0..=MAX_PRICE_CENTS).contains(&price_cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<DeliveryOption> {
        vec![
            DeliveryOption::new("1", 7, 0),
            DeliveryOption::new("2", 3, 499),
        ]
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.delivery_options().len(), 3);

        let socks = catalog
            .find_by_id(&ProductId::new("e43638ce-6aa0-4b85-b27f-e1d07eb678c6"))
            .unwrap();
        assert_eq!(socks.price_cents, 1090);
        assert_eq!(catalog.default_delivery_option().days, 7);
    }

    #[test]
    fn test_find_by_id_absent() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.find_by_id(&ProductId::new("missing")).is_none());
        assert!(!catalog.contains(&ProductId::new("missing")));
        assert!(matches!(
            catalog.product(&ProductId::new("missing")),
            Err(CommerceError::ProductNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let products = vec![
            Product::new("p1", "A", "a.jpg", 100),
            Product::new("p1", "B", "b.jpg", 200),
        ];
        let err = Catalog::new(products, options()).unwrap_err();
        assert!(matches!(err, CommerceError::DuplicateProduct(id) if id == "p1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let products = vec![Product::new("p1", "A", "a.jpg", -1)];
        let err = Catalog::new(products, options()).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { .. }));
    }

    #[test]
    fn test_price_above_line_limit_rejected() {
        let products = vec![Product::new("p1", "A", "a.jpg", 1_000_000_000_000_000_000)];
        let err = Catalog::new(products, options()).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidPrice { ref id, .. } if id == "p1"));

        let products = vec![Product::new("p1", "A", "a.jpg", MAX_PRICE_CENTS)];
        assert!(Catalog::new(products, options()).is_ok());

        let mut opts = options();
        opts.push(DeliveryOption::new("9", 1, MAX_PRICE_CENTS + 1));
        assert!(matches!(
            Catalog::new(vec![], opts),
            Err(CommerceError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_duplicate_delivery_option_rejected() {
        let mut opts = options();
        opts.push(DeliveryOption::new("2", 1, 999));
        let err = Catalog::new(vec![], opts).unwrap_err();
        assert!(matches!(err, CommerceError::DuplicateDeliveryOption(id) if id == "2"));
    }

    #[test]
    fn test_default_delivery_option_required() {
        let err = Catalog::new(vec![], vec![DeliveryOption::new("2", 3, 499)]).unwrap_err();
        assert!(matches!(err, CommerceError::DeliveryOptionNotFound(_)));
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(matches!(
            Catalog::from_json_str("{\"products\": 3}"),
            Err(CommerceError::SerializationError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.products().len(), 6);

        let missing = Catalog::load(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(CommerceError::CatalogLoad { .. })));
    }
}
