use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use billing_core::{LocalizedText, WireTimestamp};

/// Object tag carried by every product.
pub const PRODUCT_OBJECT: &str = "product";

/// Price of a product in one currency, optionally scoped to a pricing region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductPrice {
    pub currency: String,
    #[serde(default)]
    pub region: String,
    pub amount: f64,
}

/// Wire entity: a catalog product owned by a merchant's project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub object: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub sku: String,
    pub name: LocalizedText,
    pub default_currency: String,
    pub enabled: bool,
    pub prices: Vec<ProductPrice>,
    pub description: LocalizedText,
    pub long_description: LocalizedText,
    pub created_at: Option<WireTimestamp>,
    pub updated_at: Option<WireTimestamp>,
    pub images: Vec<String>,
    pub url: String,
    pub metadata: HashMap<String, String>,
    pub deleted: bool,
    pub merchant_id: String,
    pub project_id: String,
}

impl Product {
    /// Returns `true` when some price is denominated in the default currency.
    pub fn has_default_currency_price(&self) -> bool {
        self.prices
            .iter()
            .any(|p| p.currency == self.default_currency)
    }

    /// Price for a currency. With a region, only that region's price matches;
    /// without one, the first price in the currency does.
    pub fn price_in(&self, currency: &str, region: Option<&str>) -> Option<&ProductPrice> {
        self.prices.iter().find(|p| {
            p.currency == currency && region.is_none_or(|r| p.region == r)
        })
    }

    pub fn localized_name(&self, lang: &str) -> Option<&str> {
        self.name.get(lang).map(String::as_str)
    }

    pub fn localized_description(&self, lang: &str) -> Option<&str> {
        self.description.get(lang).map(String::as_str)
    }

    /// Enabled and not soft-deleted.
    pub fn is_available(&self) -> bool {
        self.enabled && !self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(currency: &str, region: &str, amount: f64) -> ProductPrice {
        ProductPrice {
            currency: currency.to_string(),
            region: region.to_string(),
            amount,
        }
    }

    fn product() -> Product {
        Product {
            default_currency: "USD".to_string(),
            enabled: true,
            prices: vec![
                price("USD", "USD", 10.0),
                price("EUR", "EUR", 9.0),
                price("EUR", "CIS", 7.5),
            ],
            name: LocalizedText::from([("en".to_string(), "Sword".to_string())]),
            ..Product::default()
        }
    }

    #[test]
    fn default_currency_price_is_detected() {
        let mut p = product();
        assert!(p.has_default_currency_price());

        p.default_currency = "RUB".to_string();
        assert!(!p.has_default_currency_price());
    }

    #[test]
    fn price_in_respects_region_when_given() {
        let p = product();
        assert_eq!(p.price_in("EUR", Some("CIS")).map(|p| p.amount), Some(7.5));
        assert_eq!(p.price_in("EUR", None).map(|p| p.amount), Some(9.0));
        assert!(p.price_in("EUR", Some("US")).is_none());
        assert!(p.price_in("GBP", None).is_none());
    }

    #[test]
    fn localized_lookups() {
        let p = product();
        assert_eq!(p.localized_name("en"), Some("Sword"));
        assert_eq!(p.localized_name("fr"), None);
        assert_eq!(p.localized_description("en"), None);
    }

    #[test]
    fn deleted_products_are_unavailable() {
        let mut p = product();
        assert!(p.is_available());
        p.deleted = true;
        assert!(!p.is_available());
    }
}
