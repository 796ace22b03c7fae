//! Report aggregation for the shopping list.
//!
//! [`summarize`] derives totals, the highest-cost item, the average unit
//! price, and the category rollup from an unfiltered collection. Everything
//! here is a pure function of its input.

#![deny(unsafe_code)]

pub mod rollup;
pub mod summary;

pub use rollup::{
    CHART_DATASET_LABEL, CategoryRollup, CategoryTotal, ChartData, SubcategoryTotal, rollup,
};
pub use summary::{HighestCostItem, ReportSnapshot, format_money, summarize};
