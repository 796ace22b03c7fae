#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod item;
pub mod snapshot;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{Result, ValidationError};
pub use item::{
    DATE_FORMAT, Item, ItemDraft, MAX_LINE_TOTAL, MIN_QUANTITY, MIN_UNIT_PRICE, parse_date,
};
pub use snapshot::Snapshot;
