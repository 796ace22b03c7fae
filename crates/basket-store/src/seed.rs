//! Bundled seed dataset used when nothing usable is stored yet.

use basket_model::Item;

const BUNDLED_SEED: &str = include_str!("../seed/items.json");

/// Parse the bundled seed items, newest first.
pub fn bundled_items() -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(BUNDLED_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_seed_parses_and_is_valid() {
        let items = bundled_items().expect("bundled seed must parse");
        assert_eq!(items.len(), 25);
        assert!(items.iter().all(|item| item.quantity() >= 1));
        assert_eq!(items[0].name(), "Whole Milk");
    }
}
