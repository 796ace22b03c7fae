//! Integration tests for the command session over a temporary data folder.

use std::time::Duration;

use basket_cli::session::{ItemChanges, PagingPlan, Session};
use basket_cli::settings::Settings;
use basket_model::ItemDraft;
use basket_query::{GrowthOutcome, ListFilter, SortKey, SortSpec};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

fn open(dir: &tempfile::TempDir) -> Session {
    Session::open(dir.path(), Settings::default(), today()).unwrap()
}

fn plan(pages: usize) -> PagingPlan {
    PagingPlan {
        filter: ListFilter::new(),
        sort: SortSpec::default(),
        page_size: 10,
        pages,
        delay: Duration::ZERO,
    }
}

fn draft(name: &str, price: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        category: "Bakery".to_string(),
        subcategory: None,
        quantity: "2".to_string(),
        price: price.to_string(),
        date: None,
    }
}

#[test]
fn first_open_seeds_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    assert_eq!(session.store().len(), 25);
    assert!(dir.path().join("shopping-list.json").exists());
}

#[test]
fn added_item_survives_reopen_and_defaults_to_today() {
    let dir = tempfile::tempdir().unwrap();
    let item = open(&dir).add(&draft("Sourdough", "4.25")).unwrap();
    assert_eq!(item.date(), today());

    let reopened = open(&dir);
    assert_eq!(reopened.store().len(), 26);
    assert_eq!(reopened.store().items()[0].name(), "Sourdough");
}

#[test]
fn invalid_draft_is_rejected_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir);
    assert!(session.add(&draft("Sourdough", "0")).is_err());
    assert!(session.add(&draft("   ", "1")).is_err());
    assert_eq!(session.store().version(), 0);
}

#[test]
fn update_keeps_unchanged_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir);
    let changes = ItemChanges {
        price: Some("9.99".to_string()),
        ..ItemChanges::default()
    };
    let (previous, updated) = session.update(0, changes).unwrap();
    assert_eq!(updated.name(), previous.name());
    assert_eq!(updated.date(), previous.date());
    assert_eq!(updated.unit_price().to_string(), "9.99");
    assert!(session.update(99, ItemChanges::default()).is_err());
}

#[test]
fn remove_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = open(&dir);
    let removed = session.remove(0).unwrap();
    assert_eq!(removed.name(), "Whole Milk");
    assert!(session.remove(24).is_err());
    assert_eq!(session.clear().unwrap(), 24);
    assert!(open(&dir).store().is_empty());
}

#[test]
fn paging_loads_until_the_list_is_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    let mut waits = Vec::new();

    let listing = session.load_pages(&plan(5), |ticket| waits.push(ticket.target_page_count()));
    assert_eq!(listing.page.len(), 25);
    assert!(!listing.page.has_more);
    assert_eq!(waits, vec![2, 3]);
    assert_eq!(
        listing.outcomes,
        vec![GrowthOutcome::Applied, GrowthOutcome::Applied, GrowthOutcome::Exhausted]
    );

    let single = session.load_pages(&plan(1), |_| panic!("no extra pages requested"));
    assert_eq!(single.page.len(), 10);
    assert!(single.page.has_more);
    assert!(single.outcomes.is_empty());
}

#[test]
fn export_includes_every_matching_item_in_sort_order() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    let everything = session.export_items(&ListFilter::new(), &SortSpec::asc(SortKey::Name));
    assert_eq!(everything.len(), 25);
    assert!(everything.windows(2).all(|pair| {
        pair[0].name().to_lowercase() <= pair[1].name().to_lowercase()
    }));

    let dairy = session.export_items(&ListFilter::new().with_category("Dairy"), &SortSpec::default());
    assert!(!dairy.is_empty());
    assert!(dairy.iter().all(|item| item.category() == "Dairy"));
}

#[test]
fn report_covers_the_whole_list() {
    let dir = tempfile::tempdir().unwrap();
    let session = open(&dir);
    let report = session.report();
    assert_eq!(report.item_count, 25);
    let rollup_total: rust_decimal::Decimal = report.rollup.categories.iter().map(|c| c.total).sum();
    assert_eq!(rollup_total, report.total_spending);
}
