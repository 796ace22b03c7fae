//! Category and subcategory choices offered by input forms.

use serde::{Deserialize, Serialize};

/// A category with its subcategory choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub category: String,
    pub subcategories: Vec<String>,
}

/// Ordered category → subcategory choices.
///
/// The catalog only drives input suggestions; items with labels outside it
/// are still valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    ("Dairy", &["Milk", "Cheese", "Yogurt", "Butter", "Cream"]),
    (
        "Vegetables",
        &["Leafy Greens", "Root Vegetables", "Peppers", "Tomatoes", "Onions"],
    ),
    ("Meat", &["Chicken", "Beef", "Pork", "Fish", "Lamb"]),
    ("Snacks", &["Chips", "Nuts", "Chocolate", "Crackers", "Cookies"]),
    ("Beverages", &["Water", "Soda", "Juice", "Coffee", "Tea"]),
];

impl Default for Catalog {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(category, subcategories)| CatalogEntry {
                category: (*category).to_string(),
                subcategories: subcategories.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();
        Self { entries }
    }
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.category.as_str())
    }

    /// Subcategory choices for `category`; empty when the category is unknown.
    pub fn subcategories(&self, category: &str) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.subcategories.as_slice())
            .unwrap_or_default()
    }

    /// True when the pair is offered. An empty subcategory matches any known category.
    pub fn contains(&self, category: &str, subcategory: &str) -> bool {
        let Some(entry) = self.entries.iter().find(|entry| entry.category == category) else {
            return false;
        };
        subcategory.is_empty() || entry.subcategories.iter().any(|s| s == subcategory)
    }
}
