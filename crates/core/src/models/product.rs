//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, timestamp};

use super::text_or_empty;

/// A product in the shop inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    /// Units in stock.
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub size: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub color: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub description: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Stock value of this product (`price * quantity`).
    #[must_use]
    pub fn stock_value(&self) -> rust_decimal::Decimal {
        self.price.amount() * rust_decimal::Decimal::from(self.quantity)
    }
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_backend_record() {
        let product: Product = serde_json::from_value(json!({
            "_id": "65f1a2b3c4d5e6f708192a3b",
            "name": "Classic Cotton Tee #1",
            "category": "T-Shirts",
            "price": 19.5,
            "quantity": 10,
            "size": "M",
            "color": null,
            "created_at": "Wed, 15 Oct 2025 10:05:00 GMT"
        }))
        .unwrap();

        assert_eq!(product.id.as_str(), "65f1a2b3c4d5e6f708192a3b");
        assert_eq!(product.price.amount(), Decimal::new(195, 1));
        assert_eq!(product.color, "");
        assert_eq!(product.description, "");
        assert_eq!(product.stock_value(), Decimal::new(1950, 1));
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let result = serde_json::from_value::<Product>(json!({
            "_id": "x",
            "name": "Tee",
            "category": "Shirts",
            "price": 1,
            "quantity": -1,
            "created_at": "2025-10-15T10:05:00Z"
        }));
        assert!(result.is_err());
    }
}
