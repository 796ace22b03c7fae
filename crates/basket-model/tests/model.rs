//! Tests for basket-model types.

use basket_model::{Catalog, Item, Snapshot, ValidationError};
use chrono::NaiveDate;
use rust_decimal_macros::dec;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn item_serializes_with_wire_names() {
    let item = Item::new("Milk", "Dairy", "Milk", 2, dec!(3.49), day(2024, 3, 1)).unwrap();
    let value = serde_json::to_value(&item).expect("serialize item");
    assert_eq!(value["name"], "Milk");
    assert_eq!(value["qty"], 2);
    assert_eq!(value["price"], 3.49);
    assert_eq!(value["date"], "2024-03-01");
    assert!(value.get("unit_price").is_none());
}

#[test]
fn item_deserializes_and_validates() {
    let json = r#"{"name":"Cheddar","category":"Dairy","subcategory":"Cheese","qty":1,"price":5,"date":"2024-03-02"}"#;
    let item: Item = serde_json::from_str(json).expect("deserialize item");
    assert_eq!(item.unit_price(), dec!(5));
    assert_eq!(item.date(), day(2024, 3, 2));

    let missing_sub = r#"{"name":"Rice","category":"Grains","qty":1,"price":2.5,"date":"2024-03-02"}"#;
    let item: Item = serde_json::from_str(missing_sub).expect("subcategory defaults");
    assert_eq!(item.subcategory(), "");
}

#[test]
fn invalid_records_do_not_deserialize() {
    let zero_qty = r#"{"name":"Milk","category":"Dairy","subcategory":"","qty":0,"price":1,"date":"2024-03-02"}"#;
    let err = serde_json::from_str::<Item>(zero_qty).unwrap_err();
    assert!(err.to_string().contains("quantity"));

    let empty_name = r#"{"name":"","category":"Dairy","subcategory":"","qty":1,"price":1,"date":"2024-03-02"}"#;
    assert!(serde_json::from_str::<Item>(empty_name).is_err());

    let bad_date = r#"{"name":"Milk","category":"Dairy","subcategory":"","qty":1,"price":1,"date":"soon"}"#;
    assert!(serde_json::from_str::<Item>(bad_date).is_err());
}

#[test]
fn json_round_trip_preserves_item() {
    let item = Item::new("Tea", "Beverages", "Tea", 4, dec!(0.99), day(2023, 12, 31)).unwrap();
    let json = serde_json::to_string(&item).unwrap();
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, item);
}

#[test]
fn snapshot_derefs_to_items() {
    let items = vec![
        Item::new("A", "X", "", 1, dec!(1), day(2024, 1, 1)).unwrap(),
        Item::new("B", "X", "", 1, dec!(1), day(2024, 1, 2)).unwrap(),
    ];
    let snapshot = Snapshot::new(7, items);
    assert_eq!(snapshot.version(), 7);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[1].name(), "B");

    let shared = snapshot.clone();
    assert_eq!(shared.items().as_ptr(), snapshot.items().as_ptr());
}

#[test]
fn default_catalog_lists_form_choices() {
    let catalog = Catalog::default();
    let categories: Vec<&str> = catalog.categories().collect();
    assert_eq!(
        categories,
        vec!["Dairy", "Vegetables", "Meat", "Snacks", "Beverages"]
    );
    assert_eq!(catalog.subcategories("Meat")[0], "Chicken");
    assert!(catalog.subcategories("Toys").is_empty());
    assert!(catalog.contains("Dairy", "Cheese"));
    assert!(catalog.contains("Dairy", ""));
    assert!(!catalog.contains("Dairy", "Chicken"));
}

#[test]
fn validation_errors_render_messages() {
    assert_eq!(
        ValidationError::PriceTooLow(dec!(0)).to_string(),
        "unit price must be at least 0.01 (got 0)"
    );
}
