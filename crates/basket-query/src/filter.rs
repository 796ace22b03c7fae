//! Row filtering.

use basket_model::Item;
use serde::{Deserialize, Serialize};

/// Conjunctive filter criteria. `None` and empty strings match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact subcategory match.
    pub subcategory: Option<String>,
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    #[must_use]
    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = non_empty(subcategory.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search.into());
        self
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        active(self.category.as_ref()).is_none()
            && active(self.subcategory.as_ref()).is_none()
            && active(self.search.as_ref()).is_none()
    }

    /// Compile the criteria for repeated matching.
    pub fn matcher(&self) -> FilterMatcher<'_> {
        FilterMatcher {
            category: active(self.category.as_ref()),
            subcategory: active(self.subcategory.as_ref()),
            needle: active(self.search.as_ref()).map(|search| search.to_lowercase()),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matcher().matches(item)
    }
}

/// A [`ListFilter`] with the search text lowercased once.
#[derive(Debug, Clone)]
pub struct FilterMatcher<'a> {
    category: Option<&'a str>,
    subcategory: Option<&'a str>,
    needle: Option<String>,
}

impl FilterMatcher<'_> {
    pub fn matches(&self, item: &Item) -> bool {
        if self.category.is_some_and(|category| item.category() != category) {
            return false;
        }
        if self
            .subcategory
            .is_some_and(|subcategory| item.subcategory() != subcategory)
        {
            return false;
        }
        match &self.needle {
            Some(needle) => item.name().to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

fn active(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|value| !value.is_empty())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
