use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{Entity, Record};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";

    fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() { return Err(ModelError::required("name")); }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ModelError::Validation("price must be a non-negative number".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

pub fn seed_products() -> Vec<Record<Product>> {
    vec![
        Record::new("1", Product { name: "Laptop".into(), price: 999.99, category: "Electronics".into(), in_stock: true }),
        Record::new("2", Product { name: "Mouse".into(), price: 29.99, category: "Electronics".into(), in_stock: true }),
    ]
}
