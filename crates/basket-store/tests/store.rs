//! Integration tests for the item store.

use std::cell::RefCell;
use std::rc::Rc;

use basket_model::Item;
use basket_store::{
    DEFAULT_STORAGE_KEY, FileStorage, ItemStore, KeyValueStorage, LoadSource, MemoryStorage,
    StorageError, StoreError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(name: &str, price: Decimal, day: u32) -> Item {
    Item::new(
        name,
        "Dairy",
        "Milk",
        1,
        price,
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
    )
    .unwrap()
}

fn seed() -> Vec<Item> {
    vec![item("Seed A", dec!(1), 2), item("Seed B", dec!(2), 1)]
}

fn names(store: &ItemStore<impl KeyValueStorage>) -> Vec<String> {
    store.items().iter().map(|i| i.name().to_string()).collect()
}

/// Storage whose reads and writes always fail.
#[derive(Default)]
struct BrokenStorage {
    write_attempts: usize,
}

impl KeyValueStorage for BrokenStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.write_attempts += 1;
        Err(StorageError::Unavailable("disk on fire".to_string()))
    }
}

#[test]
fn missing_data_falls_back_to_seed_and_persists_it() {
    let store = ItemStore::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY, seed());
    assert_eq!(store.load_source(), &LoadSource::Seed);
    assert_eq!(names(&store), vec!["Seed A", "Seed B"]);

    let stored = store.storage().get(DEFAULT_STORAGE_KEY).expect("seed written back");
    let parsed: Vec<Item> = serde_json::from_str(stored).unwrap();
    assert_eq!(parsed.len(), 2);
}

#[test]
fn corrupt_data_falls_back_to_seed() {
    let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, "{not json");
    let store = ItemStore::open(storage, DEFAULT_STORAGE_KEY, seed());
    assert!(matches!(store.load_source(), LoadSource::Recovered { .. }));
    assert_eq!(store.len(), 2);
}

#[test]
fn invalid_stored_record_counts_as_corrupt() {
    let payload = r#"[{"name":"Bad","category":"Dairy","subcategory":"","qty":0,"price":1,"date":"2024-01-01"}]"#;
    let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, payload);
    let store = ItemStore::open(storage, DEFAULT_STORAGE_KEY, seed());
    assert!(matches!(store.load_source(), LoadSource::Recovered { .. }));
    assert_eq!(names(&store), vec!["Seed A", "Seed B"]);
}

#[test]
fn stored_data_wins_over_seed() {
    let payload = r#"[{"name":"Stored","category":"Meat","subcategory":"Beef","qty":3,"price":4.5,"date":"2024-02-01"}]"#;
    let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, payload);
    let store = ItemStore::open(storage, DEFAULT_STORAGE_KEY, seed());
    assert_eq!(store.load_source(), &LoadSource::Stored);
    assert_eq!(names(&store), vec!["Stored"]);
    assert_eq!(store.items()[0].total_price(), dec!(13.5));
}

#[test]
fn high_precision_prices_survive_a_reopen() {
    let precise = dec!(12345678901234567.89);
    let tiny = dec!(0.1234567890123456789);
    let mut store = ItemStore::open(MemoryStorage::new(), "list", seed());
    store.add(item("Precise", precise, 3));
    store.add(item("Tiny", tiny, 4));
    assert_eq!(store.persist_failures(), 0);

    let payload = store.storage().get("list").unwrap().to_string();
    assert!(payload.contains(r#""price":12345678901234567.89"#), "{payload}");

    let reopened = ItemStore::open(MemoryStorage::with_value("list", payload), "list", seed());
    assert_eq!(reopened.load_source(), &LoadSource::Stored);
    assert_eq!(names(&reopened), vec!["Tiny", "Precise", "Seed A", "Seed B"]);
    assert_eq!(reopened.items()[0].unit_price(), tiny);
    assert_eq!(reopened.items()[1].unit_price(), precise);
}

#[test]
fn add_prepends_and_persists() {
    let mut store = ItemStore::open(MemoryStorage::new(), "list", seed());
    store.add(item("New", dec!(3), 3));
    assert_eq!(names(&store), vec!["New", "Seed A", "Seed B"]);
    assert_eq!(store.version(), 1);

    let stored: Vec<Item> = serde_json::from_str(store.storage().get("list").unwrap()).unwrap();
    assert_eq!(stored[0].name(), "New");
}

#[test]
fn remove_and_update_check_bounds() {
    let mut store = ItemStore::open(MemoryStorage::new(), "list", seed());

    let err = store.remove(2).unwrap_err();
    assert_eq!(err, StoreError::IndexOutOfBounds { index: 2, len: 2 });
    let err = store.update(5, item("X", dec!(1), 1)).unwrap_err();
    assert_eq!(err, StoreError::IndexOutOfBounds { index: 5, len: 2 });
    assert_eq!(store.version(), 0, "failed mutations leave the list untouched");

    let previous = store.update(1, item("Replaced", dec!(9), 9)).unwrap();
    assert_eq!(previous.name(), "Seed B");
    let removed = store.remove(0).unwrap();
    assert_eq!(removed.name(), "Seed A");
    assert_eq!(names(&store), vec!["Replaced"]);
}

#[test]
fn snapshots_are_isolated_from_later_mutations() {
    let mut store = ItemStore::open(MemoryStorage::new(), "list", seed());
    let before = store.snapshot();
    store.clear();
    assert_eq!(before.len(), 2);
    assert_eq!(before.version(), 0);
    assert!(store.is_empty());
    assert_eq!(store.snapshot().version(), 1);
}

#[test]
fn subscribers_see_every_change_until_unsubscribed() {
    let mut store = ItemStore::open(MemoryStorage::new(), "list", seed());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = store.subscribe(move |snapshot| sink.borrow_mut().push((snapshot.version(), snapshot.len())));

    store.add(item("C", dec!(1), 5));
    store.remove(0).unwrap();
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.clear();

    assert_eq!(*seen.borrow(), vec![(1, 3), (2, 2)]);
}

#[test]
fn write_failures_are_logged_not_fatal() {
    let mut store = ItemStore::open(BrokenStorage::default(), "list", seed());
    assert!(matches!(store.load_source(), LoadSource::Recovered { .. }));
    store.add(item("Still works", dec!(1), 1));
    assert_eq!(store.len(), 3);
    assert_eq!(store.persist_failures(), 2);
    assert_eq!(store.storage().write_attempts, 2);
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");

    let mut store = ItemStore::open(FileStorage::new(&data_dir), "list", seed());
    store.add(item("Persisted", dec!(2.5), 4));
    drop(store);

    let reopened = ItemStore::open(FileStorage::new(&data_dir), "list", Vec::new());
    assert_eq!(reopened.load_source(), &LoadSource::Stored);
    assert_eq!(names(&reopened), vec!["Persisted", "Seed A", "Seed B"]);
    assert!(data_dir.join("list.json").exists());
}
