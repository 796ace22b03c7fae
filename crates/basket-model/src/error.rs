use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a record cannot become an [`Item`](crate::Item).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyName,
    #[error("quantity must be at least 1 (got {0})")]
    QuantityTooLow(u32),
    #[error("unit price must be at least 0.01 (got {0})")]
    PriceTooLow(Decimal),
    #[error("line total {quantity} × {unit_price} exceeds the 10^18 limit")]
    TotalTooHigh { quantity: u32, unit_price: Decimal },
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
    #[error("invalid price: {0}")]
    InvalidPrice(String),
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
