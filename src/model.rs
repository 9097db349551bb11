//! The `products` row and its JSON mapping.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept by the `price NUMERIC(10,2)` column.
pub const PRICE_SCALE: u32 = 2;

/// One row of `products`. Columns map in declaration order: `id, name, price`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Assigned by the store; ignored in create bodies, overridden by the path on update.
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: 0,
            name: name.into(),
            price,
        }
    }

    /// Same product with the price rounded the way PostgreSQL stores `NUMERIC(10,2)`.
    pub fn normalized(mut self) -> Self {
        self.price = normalize_price(self.price);
        self
    }
}

/// Round half away from zero to two places and pin the scale, e.g. `11.2` -> `11.20`.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_serializes_as_json_number() {
        let p = Product {
            id: 1,
            name: "test product".into(),
            price: Decimal::new(1122, 2),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, json!({"id": 1, "name": "test product", "price": 11.22}));
    }

    #[test]
    fn missing_id_and_price_take_defaults() {
        let p: Product = serde_json::from_value(json!({"name": "widget"})).unwrap();
        assert_eq!(p.id, 0);
        assert_eq!(p.price, Decimal::ZERO);
    }

    #[test]
    fn missing_name_is_rejected() {
        let res: Result<Product, _> = serde_json::from_value(json!({"price": 1.5}));
        assert!(res.is_err());
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let res: Result<Product, _> = serde_json::from_value(json!({"name": "x", "price": "cheap"}));
        assert!(res.is_err());
    }

    #[test]
    fn normalize_rounds_half_away_from_zero() {
        assert_eq!(normalize_price(Decimal::new(10005, 3)).to_string(), "10.01");
        assert_eq!(normalize_price(Decimal::new(-10005, 3)).to_string(), "-10.01");
        assert_eq!(normalize_price(Decimal::new(112, 1)).to_string(), "11.20");
        assert_eq!(normalize_price(Decimal::from(3)).to_string(), "3.00");
    }
}
