//! One command invocation's view of the item list.
//!
//! A [`Session`] opens the file-backed store once and offers the operations
//! the subcommands need. Rendering stays in the binary.

use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use basket_model::{Item, ItemDraft};
use basket_query::{GrowthOutcome, GrowthTicket, ListFilter, ListPage, ListView, SortSpec, select};
use basket_report::{ReportSnapshot, summarize};
use basket_store::{FileStorage, ItemStore, bundled_items};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::settings::Settings;

/// Field changes for `update`; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub date: Option<String>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, mut draft: ItemDraft) -> ItemDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(subcategory) = self.subcategory {
            draft.subcategory = Some(subcategory);
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(date) = self.date {
            draft.date = Some(date);
        }
        draft
    }
}

/// How a `list` run should page through results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingPlan {
    pub filter: ListFilter,
    pub sort: SortSpec,
    pub page_size: usize,
    /// Pages to show; values below 1 count as 1.
    pub pages: usize,
    pub delay: Duration,
}

/// Result of a paged listing.
#[derive(Debug, Clone)]
pub struct PagedList {
    pub page: ListPage,
    /// Outcome of each growth step after the first page.
    pub outcomes: Vec<GrowthOutcome>,
}

pub struct Session {
    store: ItemStore<FileStorage>,
    settings: Settings,
    today: NaiveDate,
}

impl Session {
    /// Open the list stored in `data_dir`, seeding it on first use.
    pub fn open(data_dir: &Path, settings: Settings, today: NaiveDate) -> Result<Self> {
        let seed = bundled_items().context("parse bundled seed items")?;
        let store = ItemStore::open(FileStorage::new(data_dir), settings.storage_key.as_str(), seed);
        info!(
            data_dir = %data_dir.display(),
            items = store.len(),
            source = ?store.load_source(),
            "opened item list"
        );
        Ok(Self {
            store,
            settings,
            today,
        })
    }

    pub fn store(&self) -> &ItemStore<FileStorage> {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn add(&mut self, draft: &ItemDraft) -> Result<Item> {
        let item = draft.validate(self.today).context("invalid item")?;
        self.persisted(|store| {
            store.add(item.clone());
            Ok(())
        })?;
        Ok(item)
    }

    /// Apply `changes` to the item at `index`; returns (previous, updated).
    pub fn update(&mut self, index: usize, changes: ItemChanges) -> Result<(Item, Item)> {
        let current = self
            .store
            .items()
            .get(index)
            .with_context(|| format!("no item at index {index} (list has {} items)", self.store.len()))?;
        let draft = changes.apply(ItemDraft::from_item(current));
        let updated = draft.validate(self.today).context("invalid item")?;
        let previous = self.persisted(|store| Ok(store.update(index, updated.clone())?))?;
        Ok((previous, updated))
    }

    pub fn remove(&mut self, index: usize) -> Result<Item> {
        self.persisted(|store| Ok(store.remove(index)?))
    }

    /// Remove everything; returns how many items were dropped.
    pub fn clear(&mut self) -> Result<usize> {
        let count = self.store.len();
        self.persisted(|store| {
            store.clear();
            Ok(())
        })?;
        Ok(count)
    }

    /// Show `plan.pages` pages, waiting `plan.delay` between request and
    /// completion of each extra page.
    ///
    /// `on_wait` runs before each wait, e.g. to print a loading indicator.
    pub fn load_pages(&self, plan: &PagingPlan, mut on_wait: impl FnMut(&GrowthTicket)) -> PagedList {
        let snapshot = self.store.snapshot();
        let mut view = ListView::new(plan.page_size);
        view.set_filter(plan.filter.clone());
        view.set_sort(plan.sort);

        let mut outcomes = Vec::new();
        for _ in 1..plan.pages.max(1) {
            let Some(ticket) = view.request_growth(&snapshot) else {
                outcomes.push(GrowthOutcome::Exhausted);
                break;
            };
            on_wait(&ticket);
            if !plan.delay.is_zero() {
                thread::sleep(plan.delay);
            }
            let outcome = view.complete_growth(ticket, &snapshot);
            debug!(?outcome, page_count = view.page_count(), "growth step finished");
            outcomes.push(outcome);
            if outcome != GrowthOutcome::Applied {
                break;
            }
        }
        PagedList {
            page: view.render(&snapshot).clone(),
            outcomes,
        }
    }

    /// Every item passing `filter`, in `sort` order.
    pub fn export_items(&self, filter: &ListFilter, sort: &SortSpec) -> Vec<Item> {
        select(self.store.items(), filter, sort)
            .into_iter()
            .map(|(_, item)| item.clone())
            .collect()
    }

    pub fn report(&self) -> ReportSnapshot {
        summarize(self.store.items())
    }

    /// Run a mutation and fail if its result could not be written out.
    fn persisted<T>(
        &mut self,
        mutation: impl FnOnce(&mut ItemStore<FileStorage>) -> Result<T>,
    ) -> Result<T> {
        let failures = self.store.persist_failures();
        let value = mutation(&mut self.store)?;
        if self.store.persist_failures() > failures {
            bail!(
                "could not save the item list to {}",
                self.store.storage().base_dir().display()
            );
        }
        Ok(value)
    }
}
