//! Delimited text output of an item list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use basket_model::{DATE_FORMAT, Item};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info};

use crate::error::{ExportError, Result};

/// File name offered when saving an export.
pub const DEFAULT_EXPORT_FILENAME: &str = "shopping_list.csv";

/// Column header, using the persisted field names.
pub const EXPORT_HEADER: [&str; 6] = ["name", "category", "subcategory", "qty", "price", "date"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub delimiter: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl ExportOptions {
    /// Options with a custom field delimiter.
    pub fn with_delimiter(delimiter: char) -> Result<Self> {
        match u8::try_from(delimiter) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => {
                Ok(Self { delimiter: byte })
            }
            _ => Err(ExportError::InvalidDelimiter(delimiter)),
        }
    }
}

/// Write a header row then one row per item, in the order given.
pub fn write_csv<W: Write>(items: &[Item], writer: W, options: &ExportOptions) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(EXPORT_HEADER)?;
    for item in items {
        let quantity = item.quantity().to_string();
        let price = format_price(item.unit_price());
        let date = item.date().format(DATE_FORMAT).to_string();
        csv.write_record([
            item.name(),
            item.category(),
            item.subcategory(),
            quantity.as_str(),
            price.as_str(),
            date.as_str(),
        ])?;
    }
    csv.flush()?;
    debug!(rows = items.len(), "wrote CSV export");
    Ok(())
}

/// Render the export into a string.
pub fn to_csv_string(items: &[Item], options: &ExportOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(items, &mut buffer, options)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write the export to `path`, replacing any existing file.
pub fn write_csv_file(items: &[Item], path: &Path, options: &ExportOptions) -> Result<()> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_csv(items, &mut writer, options)?;
    writer.flush()?;
    info!(path = %path.display(), rows = items.len(), "exported item list");
    Ok(())
}

fn format_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn prices_always_carry_two_decimals() {
        assert_eq!(format_price(dec!(8)), "8.00");
        assert_eq!(format_price(dec!(2.5)), "2.50");
        assert_eq!(format_price(dec!(0.125)), "0.13");
    }

    #[test]
    fn delimiter_must_be_plain_ascii() {
        assert_eq!(ExportOptions::with_delimiter(';').unwrap().delimiter, b';');
        assert!(ExportOptions::with_delimiter('"').is_err());
        assert!(ExportOptions::with_delimiter('\n').is_err());
        assert!(ExportOptions::with_delimiter('é').is_err());
    }
}
