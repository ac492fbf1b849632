//! Combined search and category filtering for a display.
//!
//! Search and category matching use different rules (case-insensitive
//! substring vs. exact), so they are applied as two narrowing passes
//! rather than one predicate: search first when there is a query, then
//! category unless it is [`CategoryFilter::All`].

use crate::catalog::Catalog;
use crate::types::{CategoryFilter, Record, ALL_CATEGORIES};
use tracing::trace;

/// What a renderer wants to show.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Free-text query. Surrounding whitespace is ignored; blank means no search.
    pub query: String,
    pub category: CategoryFilter,
}

impl ViewFilter {
    pub fn new(query: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    /// Select the matching records from `catalog`, in catalog order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Record> {
        let query = self.query.trim();
        let records: Vec<&Record> = if query.is_empty() {
            catalog.iter().collect()
        } else {
            catalog.search(query)
        };

        let records: Vec<&Record> = match &self.category {
            CategoryFilter::Only(category) if category != ALL_CATEGORIES => records
                .into_iter()
                .filter(|record| record.category() == category)
                .collect(),
            // `All`, or `Only("all")` built without going through `parse`
            _ => records,
        };

        trace!(
            query,
            category = self.category.as_str(),
            hits = records.len(),
            "Applied view filter"
        );
        records
    }
}
