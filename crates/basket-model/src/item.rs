//! Purchase line entries.
//!
//! An [`Item`] is an immutable, validated record. The only ways to obtain one
//! are [`Item::new`], [`ItemDraft::validate`] and deserialization, which runs
//! the same checks. Anything holding an `Item` can rely on:
//!
//! - a non-empty (trimmed) name
//! - a quantity of at least 1
//! - a unit price of at least 0.01
//! - a line total (`quantity × unit_price`) of at most [`MAX_LINE_TOTAL`]

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Smallest accepted unit price.
pub const MIN_UNIT_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Smallest accepted quantity.
pub const MIN_QUANTITY: u32 = 1;

/// Largest accepted line total (10^18). Sums over any list that fits in
/// memory stay far below `Decimal::MAX`.
pub const MAX_LINE_TOTAL: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// One purchase line entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct Item {
    name: String,
    category: String,
    subcategory: String,
    #[serde(rename = "qty")]
    quantity: u32,
    #[serde(rename = "price")]
    unit_price: Decimal,
    date: NaiveDate,
}

impl Item {
    /// Build a validated item.
    ///
    /// Name and labels are trimmed before validation.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        date: NaiveDate,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if quantity < MIN_QUANTITY {
            return Err(ValidationError::QuantityTooLow(quantity));
        }
        if unit_price < MIN_UNIT_PRICE {
            return Err(ValidationError::PriceTooLow(unit_price));
        }
        match Decimal::from(quantity).checked_mul(unit_price) {
            Some(total) if total <= MAX_LINE_TOTAL => {}
            _ => return Err(ValidationError::TotalTooHigh { quantity, unit_price }),
        }
        Ok(Self {
            name,
            category: category.into().trim().to_string(),
            subcategory: subcategory.into().trim().to_string(),
            quantity,
            unit_price,
            date,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Line total: `quantity × unit_price`, bounded by [`MAX_LINE_TOTAL`].
    pub fn total_price(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }

    /// True when the item is dated on `day` (used for "new" badges).
    pub fn is_dated(&self, day: NaiveDate) -> bool {
        self.date == day
    }
}

/// Unvalidated wire shape of an item.
#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    category: String,
    #[serde(default)]
    subcategory: String,
    qty: u32,
    price: Decimal,
    date: String,
}

impl TryFrom<RawItem> for Item {
    type Error = ValidationError;

    fn try_from(raw: RawItem) -> Result<Self> {
        let date = parse_date(&raw.date)?;
        Item::new(
            raw.name,
            raw.category,
            raw.subcategory,
            raw.qty,
            raw.price,
            date,
        )
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; for timestamps only the
/// calendar date is kept.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Raw text input for a new or edited item, as collected by a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub quantity: String,
    pub price: String,
    /// `None` means "today" (the date passed to [`ItemDraft::validate`]).
    pub date: Option<String>,
}

impl ItemDraft {
    /// Start a draft from an existing item, for editing.
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            category: item.category.clone(),
            subcategory: Some(item.subcategory.clone()),
            quantity: item.quantity.to_string(),
            price: item.unit_price.to_string(),
            date: Some(item.date.format(DATE_FORMAT).to_string()),
        }
    }

    /// Validate the draft into an [`Item`], using `today` when no date is set.
    pub fn validate(&self, today: NaiveDate) -> Result<Item> {
        let quantity = self
            .quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidQuantity(self.quantity.clone()))?;
        let unit_price = Decimal::from_str(self.price.trim())
            .map_err(|_| ValidationError::InvalidPrice(self.price.clone()))?;
        let date = match self.date.as_deref() {
            Some(value) if !value.trim().is_empty() => parse_date(value)?,
            _ => today,
        };
        Item::new(
            self.name.as_str(),
            self.category.as_str(),
            self.subcategory.as_deref().unwrap_or_default(),
            quantity,
            unit_price,
            date,
        )
    }
}
