//! Integration tests for report aggregation.

use basket_model::Item;
use basket_report::{CHART_DATASET_LABEL, HighestCostItem, format_money, rollup, summarize};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(name: &str, category: &str, subcategory: &str, qty: u32, price: Decimal) -> Item {
    Item::new(
        name,
        category,
        subcategory,
        qty,
        price,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    )
    .unwrap()
}

#[test]
fn summary_totals_highest_and_average() {
    let items = vec![
        item("A", "Dairy", "Milk", 2, dec!(3)),
        item("B", "Meat", "Beef", 1, dec!(10)),
        item("C", "Snacks", "Chips", 5, dec!(1)),
    ];
    let report = summarize(&items);
    assert_eq!(report.item_count, 3);
    assert_eq!(report.total_spending, dec!(21));
    assert_eq!(
        report.highest_cost_item,
        HighestCostItem {
            name: "B".to_string(),
            quantity: 1,
            unit_price: dec!(10),
        }
    );
    // Unweighted mean of unit prices: (3 + 10 + 1) / 3.
    assert_eq!(report.average_cost.round_dp(4), dec!(4.6667));
}

#[test]
fn empty_collection_yields_sentinels() {
    let report = summarize(&[]);
    assert_eq!(report.item_count, 0);
    assert_eq!(report.total_spending, Decimal::ZERO);
    assert_eq!(report.average_cost, Decimal::ZERO);
    assert!(report.highest_cost_item.is_empty());
    assert_eq!(report.highest_cost_item, HighestCostItem::empty());
    assert!(report.rollup.is_empty());
    assert!(report.rollup.chart_data().labels.is_empty());
}

#[test]
fn first_item_wins_price_ties() {
    let items = vec![
        item("First", "Dairy", "Milk", 1, dec!(5)),
        item("Second", "Dairy", "Milk", 9, dec!(5)),
    ];
    assert_eq!(summarize(&items).highest_cost_item.name, "First");
}

#[test]
fn rollup_keeps_first_seen_order() {
    let items = vec![
        item("Milk", "Dairy", "Milk", 2, dec!(3)),
        item("Chicken", "Meat", "Chicken", 1, dec!(10)),
        item("Cheddar", "Dairy", "Cheese", 1, dec!(4)),
    ];
    let groups = rollup(&items);

    assert_eq!(groups.category_labels(), vec!["Dairy", "Meat"]);
    assert_eq!(groups.subcategory_labels(), vec!["Milk", "Cheese", "Chicken"]);
    assert_eq!(groups.subcategory_series(), vec![dec!(6), dec!(4), dec!(10)]);
    assert_eq!(groups.category_series(), vec![dec!(10), dec!(10)]);

    for category in &groups.categories {
        let sum: Decimal = category.subcategories.iter().map(|s| s.total).sum();
        assert_eq!(category.total, sum);
    }
}

#[test]
fn same_subcategory_name_under_two_categories_stays_separate() {
    let items = vec![
        item("Oat drink", "Beverages", "Other", 1, dec!(2)),
        item("Jerky", "Meat", "Other", 2, dec!(3)),
        item("Cola", "Beverages", "Other", 1, dec!(1)),
    ];
    let groups = rollup(&items);
    assert_eq!(groups.categories.len(), 2);
    assert_eq!(groups.categories[0].subcategories.len(), 1);
    assert_eq!(groups.categories[0].total, dec!(3));
    assert_eq!(groups.categories[1].total, dec!(6));
}

#[test]
fn chart_data_lists_categories_then_subcategories() {
    let items = vec![
        item("Milk", "Dairy", "Milk", 2, dec!(3)),
        item("Chicken", "Meat", "Chicken", 1, dec!(10)),
        item("Cheddar", "Dairy", "Cheese", 1, dec!(4)),
    ];
    let chart = rollup(&items).chart_data();
    assert_eq!(chart.label, CHART_DATASET_LABEL);
    assert_eq!(chart.labels.len(), chart.series.len());

    let rendered: Vec<String> = chart
        .labels
        .iter()
        .zip(&chart.series)
        .map(|(label, value)| format!("{label}: {}", format_money(*value)))
        .collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    Dairy: $6.00
    Meat: $4.00
    Milk: $10.00
    Cheese: $10.00
    Chicken: $10.00
    ");
}

#[test]
fn money_is_rendered_with_two_decimals() {
    assert_eq!(format_money(dec!(21)), "$21.00");
    assert_eq!(format_money(dec!(4.666666)), "$4.67");
    assert_eq!(format_money(Decimal::ZERO), "$0.00");
}
