//! Sort keys and comparison.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use basket_model::Item;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column an item list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Category,
    Subcategory,
    #[serde(rename = "qty")]
    Quantity,
    Price,
    TotalPrice,
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Name,
        SortKey::Category,
        SortKey::Subcategory,
        SortKey::Quantity,
        SortKey::Price,
        SortKey::TotalPrice,
        SortKey::Date,
    ];

    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Subcategory => "subcategory",
            SortKey::Quantity => "qty",
            SortKey::Price => "price",
            SortKey::TotalPrice => "totalPrice",
            SortKey::Date => "date",
        }
    }

    /// Ascending comparison of two items on this key.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Name => compare_text(a.name(), b.name()),
            SortKey::Category => compare_text(a.category(), b.category()),
            SortKey::Subcategory => compare_text(a.subcategory(), b.subcategory()),
            SortKey::Quantity => a.quantity().cmp(&b.quantity()),
            SortKey::Price => a.unit_price().cmp(&b.unit_price()),
            SortKey::TotalPrice => a.total_price().cmp(&b.total_price()),
            SortKey::Date => a.date().cmp(&b.date()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key '{0}' (expected one of: name, category, subcategory, qty, price, totalPrice, date)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    /// Accepts the wire names plus a few spelled-out aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
        match normalized.as_str() {
            "name" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "subcategory" => Ok(SortKey::Subcategory),
            "qty" | "quantity" => Ok(SortKey::Quantity),
            "price" | "unitprice" => Ok(SortKey::Price),
            "totalprice" | "total" => Ok(SortKey::TotalPrice),
            "date" => Ok(SortKey::Date),
            _ => Err(ParseSortKeyError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "ascend")]
    Asc,
    #[serde(alias = "descend")]
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    /// Most recent first.
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn asc(key: SortKey) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn desc(key: SortKey) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Directed comparison. Equal keys compare `Equal` in both directions so
    /// a stable sort keeps their incoming order.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self.direction {
            SortDirection::Asc => self.key.compare(a, b),
            SortDirection::Desc => self.key.compare(b, a),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction)
    }
}

/// Case-insensitive ordering with an exact tiebreak, so distinct strings
/// never compare equal.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
