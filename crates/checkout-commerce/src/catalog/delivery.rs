//! Delivery option types.

use crate::ids::DeliveryOptionId;
use crate::money::{Currency, Money};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Option selected for a new cart entry.
pub const DEFAULT_DELIVERY_OPTION_ID: &str = "1";

/// Label shown instead of a price for free delivery.
pub const FREE_LABEL: &str = "Free";

/// Format used for delivery dates, e.g. "Tuesday, June 07".
pub const DELIVERY_DATE_FORMAT: &str = "%A, %B %d";

/// A shipping tier with a lead time and a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    /// Unique identifier.
    pub id: DeliveryOptionId,
    /// Calendar days from today until delivery.
    pub days: u32,
    /// Price in cents; zero means free.
    pub price_cents: i64,
}

impl DeliveryOption {
    /// Create a new delivery option.
    pub fn new(id: impl Into<DeliveryOptionId>, days: u32, price_cents: i64) -> Self {
        Self {
            id: id.into(),
            days,
            price_cents,
        }
    }

    /// Check if this is free delivery.
    pub fn is_free(&self) -> bool {
        self.price_cents == 0
    }

    /// Delivery price in the given currency.
    pub fn price(&self, currency: Currency) -> Money {
        Money::new(self.price_cents, currency)
    }

    /// Price label: "Free" or a currency string like "$4.99".
    pub fn price_label(&self, currency: Currency) -> String {
        if self.is_free() {
            FREE_LABEL.to_string()
        } else {
            self.price(currency).display()
        }
    }

    /// Date of delivery when ordered on `today`, in calendar days.
    ///
    /// Returns `None` only if the date falls outside chrono's range.
    pub fn delivery_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_days(Days::new(u64::from(self.days)))
    }

    /// Human-readable delivery date, e.g. "Tuesday, June 07".
    pub fn delivery_date_label(&self, today: NaiveDate) -> Option<String> {
        self.delivery_date(today)
            .map(|date| date.format(DELIVERY_DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_price_label() {
        let free = DeliveryOption::new("1", 7, 0);
        assert!(free.is_free());
        assert_eq!(free.price_label(Currency::USD), "Free");

        let express = DeliveryOption::new("3", 1, 999);
        assert!(!express.is_free());
        assert_eq!(express.price_label(Currency::USD), "$9.99");
    }

    #[test]
    fn test_delivery_date_uses_calendar_days() {
        // Friday + 1 day lands on Saturday, not the next business day
        let option = DeliveryOption::new("3", 1, 999);
        let friday = date(2024, 6, 7);
        assert_eq!(option.delivery_date(friday), Some(date(2024, 6, 8)));
    }

    #[test]
    fn test_delivery_date_crosses_month_and_year() {
        let option = DeliveryOption::new("1", 7, 0);
        assert_eq!(
            option.delivery_date(date(2024, 12, 28)),
            Some(date(2025, 1, 4))
        );
    }

    #[test]
    fn test_delivery_date_label() {
        let option = DeliveryOption::new("2", 3, 499);
        let label = option.delivery_date_label(date(2024, 6, 4)).unwrap();
        assert_eq!(label, "Friday, June 07");
    }

    #[test]
    fn test_same_day_option() {
        let option = DeliveryOption::new("0", 0, 1999);
        let today = date(2024, 2, 29);
        assert_eq!(option.delivery_date(today), Some(today));
    }
}
