//! Order summary for the checkout page.

use crate::cart::{total_quantity, CartItem};
use crate::catalog::{Catalog, DeliveryOption};
use crate::ids::{DeliveryOptionId, ProductId};
use crate::money::{Currency, Money};
use chrono::NaiveDate;
use serde::Serialize;

/// Shown when a delivery date cannot be represented.
const UNKNOWN_DATE_LABEL: &str = "Unknown";

/// One selectable delivery tier on a summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryChoice {
    pub delivery_option_id: DeliveryOptionId,
    pub date_label: String,
    pub price_label: String,
    pub selected: bool,
}

/// One cart entry joined with its product and delivery option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price_label: String,
    pub quantity: i64,
    pub line_subtotal: Money,
    /// Option the row is priced with. Differs from the stored id when that
    /// id is not in the catalog.
    pub delivery_option_id: DeliveryOptionId,
    pub delivery_date_label: String,
    pub delivery_price_label: String,
    pub choices: Vec<DeliveryChoice>,
}

/// A cart entry that could not be fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "fault", rename_all = "snake_case")]
pub enum SummaryFault {
    /// The product is no longer in the catalog; the entry was skipped.
    UnknownProduct { product_id: ProductId },
    /// The delivery option is not in the catalog; the default was used.
    UnknownDeliveryOption {
        product_id: ProductId,
        delivery_option_id: DeliveryOptionId,
    },
    /// The entry's price does not fit in the order totals; the entry was skipped.
    Overflow { product_id: ProductId },
}

/// Totals for the payment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub items_subtotal: Money,
    pub shipping_total: Money,
    pub order_total: Money,
}

impl PaymentSummary {
    /// Totals with one more line and its shipping, or `None` on overflow.
    fn try_add(&self, line_subtotal: &Money, shipping: &Money) -> Option<Self> {
        let items_subtotal = self.items_subtotal.try_add(line_subtotal)?;
        let shipping_total = self.shipping_total.try_add(shipping)?;
        let order_total = items_subtotal.try_add(&shipping_total)?;
        Some(Self {
            items_subtotal,
            shipping_total,
            order_total,
        })
    }
}

/// View model for the checkout page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub rows: Vec<SummaryRow>,
    pub faults: Vec<SummaryFault>,
    /// Number of cart entries.
    pub item_count: usize,
    /// Sum of all quantities; the cart badge.
    pub total_quantity: i64,
    pub payment: PaymentSummary,
}

impl OrderSummary {
    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if any entry was skipped or degraded.
    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// Builds [`OrderSummary`] values from cart entries.
#[derive(Debug, Clone, Copy)]
pub struct OrderSummaryBuilder<'a> {
    catalog: &'a Catalog,
    currency: Currency,
}

impl<'a> OrderSummaryBuilder<'a> {
    /// Create a builder pricing in USD.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            currency: Currency::default(),
        }
    }

    /// Set the currency used for labels and totals.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Build the summary for `items`, with delivery dates counted from `today`.
    ///
    /// Entries that cannot be priced, because the product is missing from
    /// the catalog or the amounts overflow, are skipped and reported in
    /// [`OrderSummary::faults`]. They never abort the build.
    pub fn build(&self, items: &[CartItem], today: NaiveDate) -> OrderSummary {
        let mut rows = Vec::with_capacity(items.len());
        let mut faults = Vec::new();
        let mut payment = PaymentSummary {
            items_subtotal: Money::zero(self.currency),
            shipping_total: Money::zero(self.currency),
            order_total: Money::zero(self.currency),
        };

        for item in items {
            let Some(product) = self.catalog.find_by_id(&item.product_id) else {
                tracing::warn!(product_id = %item.product_id, "cart entry references unknown product");
                faults.push(SummaryFault::UnknownProduct {
                    product_id: item.product_id.clone(),
                });
                continue;
            };

            let chosen = match self.catalog.delivery_option(&item.delivery_option_id) {
                Some(option) => option,
                None => {
                    tracing::warn!(
                        product_id = %item.product_id,
                        delivery_option_id = %item.delivery_option_id,
                        "cart entry references unknown delivery option"
                    );
                    faults.push(SummaryFault::UnknownDeliveryOption {
                        product_id: item.product_id.clone(),
                        delivery_option_id: item.delivery_option_id.clone(),
                    });
                    self.catalog.default_delivery_option()
                }
            };

            let unit_price = product.price(self.currency);
            let shipping = chosen.price(self.currency);
            let Some((line_subtotal, next)) = unit_price
                .try_multiply(item.quantity)
                .and_then(|line| Some((line, payment.try_add(&line, &shipping)?)))
            else {
                tracing::warn!(product_id = %item.product_id, "cart entry overflows order totals");
                faults.push(SummaryFault::Overflow {
                    product_id: item.product_id.clone(),
                });
                continue;
            };
            payment = next;

            rows.push(SummaryRow {
                product_id: product.id.clone(),
                name: product.name.clone(),
                image: product.image.clone(),
                unit_price_label: unit_price.display(),
                quantity: item.quantity,
                line_subtotal,
                delivery_option_id: chosen.id.clone(),
                delivery_date_label: date_label(chosen, today),
                delivery_price_label: chosen.price_label(self.currency),
                choices: self.choices(chosen, today),
            });
        }

        OrderSummary {
            rows,
            faults,
            item_count: items.len(),
            total_quantity: total_quantity(items),
            payment,
        }
    }

    fn choices(&self, chosen: &DeliveryOption, today: NaiveDate) -> Vec<DeliveryChoice> {
        self.catalog
            .delivery_options()
            .iter()
            .map(|option| DeliveryChoice {
                delivery_option_id: option.id.clone(),
                date_label: date_label(option, today),
                price_label: option.price_label(self.currency),
                selected: option.id == chosen.id,
            })
            .collect()
    }
}

fn date_label(option: &DeliveryOption, today: NaiveDate) -> String {
    option
        .delivery_date_label(today)
        .unwrap_or_else(|| UNKNOWN_DATE_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MAX_QUANTITY_PER_ITEM;
    use crate::catalog::{Product, MAX_PRICE_CENTS};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Product::new("socks", "Socks", "socks.jpg", 1090),
                Product::new("ball", "Basketball", "ball.jpg", 2095),
            ],
            vec![
                DeliveryOption::new("1", 7, 0),
                DeliveryOption::new("2", 3, 499),
                DeliveryOption::new("3", 1, 999),
            ],
        )
        .unwrap()
    }

    fn today() -> NaiveDate {
        // a Tuesday
        NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()
    }

    fn item(id: &str, quantity: i64, option: &str) -> CartItem {
        CartItem {
            product_id: ProductId::new(id),
            quantity,
            delivery_option_id: DeliveryOptionId::new(option),
        }
    }

    #[test]
    fn test_rows_follow_cart_order() {
        let catalog = catalog();
        let items = vec![item("ball", 1, "1"), item("socks", 2, "2")];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());

        let names: Vec<&str> = summary.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Basketball", "Socks"]);
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 3);
        assert!(!summary.has_faults());
    }

    #[test]
    fn test_row_delivery_fields() {
        let catalog = catalog();
        let items = vec![item("socks", 2, "2")];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());
        let row = &summary.rows[0];

        assert_eq!(row.unit_price_label, "$10.90");
        assert_eq!(row.line_subtotal.amount_cents, 2180);
        assert_eq!(row.delivery_date_label, "Friday, June 07");
        assert_eq!(row.delivery_price_label, "$4.99");

        assert_eq!(row.choices.len(), 3);
        let selected: Vec<&str> = row
            .choices
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.delivery_option_id.as_str())
            .collect();
        assert_eq!(selected, vec!["2"]);
        assert_eq!(row.choices[0].price_label, "Free");
        assert_eq!(row.choices[0].date_label, "Tuesday, June 11");
        assert_eq!(row.choices[2].date_label, "Wednesday, June 05");
    }

    #[test]
    fn test_unknown_product_is_skipped_not_fatal() {
        let catalog = catalog();
        let items = vec![item("ghost", 4, "1"), item("socks", 1, "1")];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());

        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].product_id.as_str(), "socks");
        assert_eq!(
            summary.faults,
            vec![SummaryFault::UnknownProduct {
                product_id: ProductId::new("ghost")
            }]
        );
        // counts describe the cart itself
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.payment.items_subtotal.amount_cents, 1090);
    }

    #[test]
    fn test_unknown_delivery_option_falls_back_to_default() {
        let catalog = catalog();
        let items = vec![item("socks", 1, "9")];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());
        let row = &summary.rows[0];

        assert_eq!(row.delivery_option_id.as_str(), "1");
        assert_eq!(row.delivery_price_label, "Free");
        assert!(row.choices[0].selected);
        assert!(matches!(
            summary.faults.as_slice(),
            [SummaryFault::UnknownDeliveryOption { .. }]
        ));
    }

    #[test]
    fn test_payment_totals() {
        let catalog = catalog();
        let items = vec![item("socks", 2, "3"), item("ball", 1, "2")];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());

        assert_eq!(summary.payment.items_subtotal.amount_cents, 2 * 1090 + 2095);
        assert_eq!(summary.payment.shipping_total.amount_cents, 999 + 499);
        assert_eq!(
            summary.payment.order_total.amount_cents,
            2 * 1090 + 2095 + 999 + 499
        );
    }

    #[test]
    fn test_currency_only_changes_symbol() {
        let catalog = catalog();
        let items = vec![item("socks", 1, "2")];

        let summary = OrderSummaryBuilder::new(&catalog)
            .with_currency(Currency::GBP)
            .build(&items, today());

        assert_eq!(summary.rows[0].unit_price_label, "\u{00a3}10.90");
        assert_eq!(summary.payment.order_total.currency, Currency::GBP);
    }

    #[test]
    fn test_empty_cart() {
        let catalog = catalog();
        let summary = OrderSummaryBuilder::new(&catalog).build(&[], today());

        assert!(summary.is_empty());
        assert_eq!(summary.total_quantity, 0);
        assert!(summary.payment.order_total.is_zero());
    }

    #[test]
    fn test_overflowing_entry_is_skipped_not_fatal() {
        let big = MAX_PRICE_CENTS;
        let catalog = Catalog::new(
            vec![
                Product::new("cheap", "Cheap", "cheap.jpg", 100),
                Product::new("big", "Big", "big.jpg", big),
                Product::new("bigger", "Bigger", "bigger.jpg", big),
            ],
            vec![DeliveryOption::new("1", 7, 0)],
        )
        .unwrap();
        let max = MAX_QUANTITY_PER_ITEM;
        let items = vec![
            item("cheap", 1, "1"),
            item("big", max, "1"),
            item("bigger", max, "1"),
        ];

        let summary = OrderSummaryBuilder::new(&catalog).build(&items, today());

        let ids: Vec<&str> = summary.rows.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["cheap", "big"]);
        assert_eq!(
            summary.faults,
            vec![SummaryFault::Overflow {
                product_id: ProductId::new("bigger")
            }]
        );
        assert_eq!(summary.payment.items_subtotal.amount_cents, 100 + big * max);
        assert_eq!(
            summary.payment.order_total,
            summary.payment.items_subtotal
        );
        assert_eq!(summary.item_count, 3);
    }
}
