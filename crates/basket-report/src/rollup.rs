//! Category → subcategory spending rollup.
//!
//! Groups are kept in first-seen order (the order in which a category, or a
//! subcategory within its category, first appears in the collection). The
//! chart layout depends on that order, so it must never be re-sorted.

use std::collections::HashMap;

use basket_model::Item;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dataset label for the spending chart.
pub const CHART_DATASET_LABEL: &str = "Total Spending";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryTotal {
    pub subcategory: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    /// Sum of the subcategory totals.
    pub total: Decimal,
    pub subcategories: Vec<SubcategoryTotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRollup {
    pub categories: Vec<CategoryTotal>,
}

/// Labels and values handed to a chart renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub label: String,
    pub labels: Vec<String>,
    pub series: Vec<Decimal>,
}

/// Sum line totals per (category, subcategory) in first-seen order.
pub fn rollup(items: &[Item]) -> CategoryRollup {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut category_slots: HashMap<&str, usize> = HashMap::new();
    let mut subcategory_slots: HashMap<(&str, &str), usize> = HashMap::new();

    for item in items {
        let line_total = item.total_price();
        let category_slot = *category_slots.entry(item.category()).or_insert_with(|| {
            categories.push(CategoryTotal {
                category: item.category().to_string(),
                total: Decimal::ZERO,
                subcategories: Vec::new(),
            });
            categories.len() - 1
        });
        let group = &mut categories[category_slot];
        let sub_slot = *subcategory_slots
            .entry((item.category(), item.subcategory()))
            .or_insert_with(|| {
                group.subcategories.push(SubcategoryTotal {
                    subcategory: item.subcategory().to_string(),
                    total: Decimal::ZERO,
                });
                group.subcategories.len() - 1
            });
        group.subcategories[sub_slot].total += line_total;
        group.total += line_total;
    }

    CategoryRollup { categories }
}

impl CategoryRollup {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category labels in first-seen order.
    pub fn category_labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.category.clone()).collect()
    }

    /// Subcategory labels, category by category.
    pub fn subcategory_labels(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter().map(|s| s.subcategory.clone()))
            .collect()
    }

    /// Subcategory totals, category by category.
    pub fn subcategory_series(&self) -> Vec<Decimal> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter().map(|s| s.total))
            .collect()
    }

    /// One total per category, in the same order as [`Self::category_labels`].
    pub fn category_series(&self) -> Vec<Decimal> {
        self.categories.iter().map(|c| c.total).collect()
    }

    /// Chart input: category labels then subcategory labels; subcategory
    /// totals then category totals.
    pub fn chart_data(&self) -> ChartData {
        let mut labels = self.category_labels();
        labels.extend(self.subcategory_labels());
        let mut series = self.subcategory_series();
        series.extend(self.category_series());
        ChartData {
            label: CHART_DATASET_LABEL.to_string(),
            labels,
            series,
        }
    }
}
