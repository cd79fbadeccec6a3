use serde_json::json;

use crate::product::{seed_products, Product, ProductPatch};
use crate::{Entity, Record};

#[test]
fn product_record_uses_camel_case() -> Result<(), anyhow::Error> {
    let rec: Record<Product> = serde_json::from_value(json!({
        "id": "7", "name": "Cable", "price": 4.5, "category": "Electronics", "inStock": false
    }))?;
    assert_eq!(rec.price, 4.5);
    assert!(!rec.in_stock);
    assert_eq!(serde_json::to_value(&rec)?["inStock"], json!(false));
    Ok(())
}

#[test]
fn product_validation() {
    let p = Product { name: "Desk".into(), price: 10.0, category: "Furniture".into(), in_stock: true };
    assert!(p.validate().is_ok());
    assert!(Product { price: -1.0, ..p.clone() }.validate().is_err());
    assert!(Product { price: f64::NAN, ..p.clone() }.validate().is_err());
    assert!(Product { name: String::new(), ..p }.validate().is_err());
}

#[test]
fn product_patch_and_seeds() -> Result<(), anyhow::Error> {
    let patch = ProductPatch { in_stock: Some(false), ..ProductPatch::default() };
    assert_eq!(serde_json::to_value(&patch)?, json!({"inStock": false}));
    let seeds = seed_products();
    assert_eq!(seeds.len(), 2);
    assert_eq!(seeds[0].name, "Laptop");
    Ok(())
}
