//! Summary statistics over the whole collection.

use basket_model::Item;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rollup::{CategoryRollup, rollup};

/// The most expensive item by unit price.
///
/// On an empty collection this is the empty sentinel: no name, quantity 0,
/// price 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestCostItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl HighestCostItem {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            quantity: 0,
            unit_price: Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == 0 && self.name.is_empty()
    }

    fn from_item(item: &Item) -> Self {
        Self {
            name: item.name().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
        }
    }
}

impl Default for HighestCostItem {
    fn default() -> Self {
        Self::empty()
    }
}

/// Derived report figures for one collection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub item_count: usize,
    /// Σ quantity × unit price.
    pub total_spending: Decimal,
    pub highest_cost_item: HighestCostItem,
    /// Unweighted mean of unit prices (Σ unit price / item count), not
    /// spend per unit bought.
    pub average_cost: Decimal,
    pub rollup: CategoryRollup,
}

/// Compute the report for `items`. An empty collection yields zeros and the
/// empty highest-cost sentinel.
pub fn summarize(items: &[Item]) -> ReportSnapshot {
    let mut total_spending = Decimal::ZERO;
    let mut price_sum = Decimal::ZERO;
    let mut highest: Option<&Item> = None;

    for item in items {
        total_spending += item.total_price();
        price_sum += item.unit_price();
        // Strictly greater: the first of several equal prices wins.
        if highest.is_none_or(|current| item.unit_price() > current.unit_price()) {
            highest = Some(item);
        }
    }

    let average_cost = if items.is_empty() {
        Decimal::ZERO
    } else {
        price_sum / Decimal::from(items.len())
    };
    let report = ReportSnapshot {
        item_count: items.len(),
        total_spending,
        highest_cost_item: highest
            .map(HighestCostItem::from_item)
            .unwrap_or_else(HighestCostItem::empty),
        average_cost,
        rollup: rollup(items),
    };
    debug!(
        items = report.item_count,
        categories = report.rollup.categories.len(),
        total = %report.total_spending,
        "summarized item list"
    );
    report
}

/// Render an amount as dollars with two decimals, e.g. `$21.00`.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
