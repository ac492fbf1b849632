//! The catalog: an ordered, exclusively owned collection of records.

use crate::error::{CatalogError, Result};
use crate::subscriptions::{
    CatalogEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager, DEFAULT_BUFFER_SIZE,
};
use crate::types::{Record, ALL_CATEGORIES};
use crate::view::ViewFilter;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Catalog configuration.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// Buffer size used by [`Catalog::subscribe`].
    pub subscription_buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            subscription_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// An ordered collection of records.
///
/// Insertion order is display order. Titles act as the lookup key for
/// [`remove`](Catalog::remove) and
/// [`toggle_availability`](Catalog::toggle_availability); nothing enforces
/// their uniqueness unless callers go through [`try_add`](Catalog::try_add).
/// With duplicates, removal drops every match and toggling flips only the
/// first in insertion order.
///
/// Queries never fail: no match is an empty result, and a mutation aimed at
/// a missing title is a no-op.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Catalog configuration.
    config: CatalogConfig,

    /// Records in insertion order.
    records: Vec<Record>,

    /// Change notifications.
    subscriptions: SubscriptionManager,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with custom configuration.
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // --- Mutations ---

    /// Append a record to the end of the catalog.
    ///
    /// Subscribers get [`CatalogEvent::Added`]; any that cannot take it are
    /// dropped from the subscription table.
    pub fn add(&mut self, record: Record) {
        debug!(title = record.title(), category = record.category(), "Adding record");
        let event = CatalogEvent::Added {
            title: record.title().to_string(),
        };
        self.records.push(record);
        self.subscriptions.broadcast(event);
    }

    /// Append a record unless its title is already present.
    pub fn try_add(&mut self, record: Record) -> Result<()> {
        if self.contains(record.title()) {
            return Err(CatalogError::DuplicateTitle(record.title().to_string()));
        }
        self.add(record);
        Ok(())
    }

    /// Remove every record with exactly this title. Returns how many went.
    ///
    /// Emits [`CatalogEvent::Removed`] when at least one record matched.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|record| record.title() != title);
        let count = before - self.records.len();

        if count > 0 {
            debug!(title, count, "Removed records");
            self.subscriptions.broadcast(CatalogEvent::Removed {
                title: title.to_string(),
                count,
            });
        } else {
            trace!(title, "Remove matched nothing");
        }
        count
    }

    /// Flip availability of the first record with exactly this title.
    ///
    /// Returns the new availability, or `None` when no record matched.
    /// Emits [`CatalogEvent::AvailabilityToggled`] on a match.
    pub fn toggle_availability(&mut self, title: &str) -> Option<bool> {
        let record = self.records.iter_mut().find(|record| record.title() == title)?;
        let available = record.toggle_availability();

        debug!(title, available, "Toggled availability");
        self.subscriptions.broadcast(CatalogEvent::AvailabilityToggled {
            title: title.to_string(),
            available,
        });
        Some(available)
    }

    // --- Queries ---

    /// Every record, in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record has exactly this title.
    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    /// First record with exactly this title.
    pub fn get(&self, title: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.title() == title)
    }

    /// Case-insensitive substring search over title and author.
    ///
    /// The query is used as given; an empty query matches every record.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let needle = query.to_lowercase();
        let hits: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| record.matches_lowercase(&needle))
            .collect();

        trace!(query, hits = hits.len(), "Searched catalog");
        hits
    }

    /// Records whose category equals `category` exactly.
    ///
    /// `"all"` is reserved and returns every record.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Record> {
        if category == ALL_CATEGORIES {
            trace!(category, hits = self.records.len(), "Category filter skipped");
            return self.records.iter().collect();
        }

        let hits: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| record.category() == category)
            .collect();

        trace!(category, hits = hits.len(), "Filtered by category");
        hits
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(Record::category)
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// Records selected by a combined search and category filter.
    pub fn view(&self, filter: &ViewFilter) -> Vec<&Record> {
        filter.apply(self)
    }

    // --- Export ---

    /// Every record as a JSON array, for a renderer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// The records selected by `filter` as a JSON array.
    pub fn view_json(&self, filter: &ViewFilter) -> Result<String> {
        Ok(serde_json::to_string(&self.view(filter))?)
    }

    // --- Subscriptions ---

    /// Subscribe with the configured buffer size.
    pub fn subscribe(&self, filter: SubscriptionFilter) -> SubscriptionHandle {
        self.subscribe_with(SubscriptionConfig {
            buffer_size: self.config.subscription_buffer_size,
            filter,
        })
    }

    pub fn subscribe_with(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }
}

impl FromIterator<Record> for Catalog {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Extend<Record> for Catalog {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.add(record);
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::DropReason;
    use crate::types::CategoryFilter;

    fn titles<'a>(records: &[&'a Record]) -> Vec<&'a str> {
        records.iter().map(|record| record.title()).collect()
    }

    fn sample() -> Catalog {
        [
            Record::book("Atomic Habits", "James Clear", "Self-Help"),
            Record::book("Sapiens", "Yuval Noah Harari", "History"),
            Record::book("The Selfish Gene", "Richard Dawkins", "Science"),
            Record::reference("Oxford Dictionary", "Oxford", "Reference", "REF001"),
            Record::book("Harry Potter", "J.K. Rowling", "Fantasy"),
            Record::book("Educated", "Tara Westover", "Biography"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_add_preserves_order() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        catalog.add(Record::book("B", "x", "c"));
        catalog.add(Record::book("A", "x", "c"));
        catalog.add(Record::book("C", "x", "c"));

        let order: Vec<&str> = catalog.iter().map(Record::title).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut catalog = sample();
        let before = catalog.all().to_vec();

        assert_eq!(catalog.remove("Dune"), 0);
        assert_eq!(catalog.all(), before.as_slice());
    }

    #[test]
    fn test_remove_is_exact_match() {
        let mut catalog = sample();
        assert_eq!(catalog.remove("sapiens"), 0);
        assert_eq!(catalog.remove("Sapiens"), 1);
        assert!(!catalog.contains("Sapiens"));
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut catalog = Catalog::new();
        catalog.add(Record::book("Dup", "First", "A"));
        catalog.add(Record::book("Other", "x", "A"));
        catalog.add(Record::book("Dup", "Second", "B"));

        assert_eq!(catalog.remove("Dup"), 2);
        let left: Vec<&str> = catalog.iter().map(Record::title).collect();
        assert_eq!(left, vec!["Other"]);
    }

    #[test]
    fn test_toggle_first_duplicate_only() {
        let mut catalog = Catalog::new();
        catalog.add(Record::book("Dup", "First", "A"));
        catalog.add(Record::book("Dup", "Second", "B"));

        assert_eq!(catalog.toggle_availability("Dup"), Some(false));
        assert!(!catalog.all()[0].is_available());
        assert!(catalog.all()[1].is_available());
        assert_eq!(catalog.get("Dup").map(Record::author), Some("First"));
    }

    #[test]
    fn test_toggle_missing_is_noop() {
        let mut catalog = sample();
        let before = catalog.all().to_vec();
        assert_eq!(catalog.toggle_availability("Dune"), None);
        assert_eq!(catalog.all(), before.as_slice());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut catalog = sample();
        assert_eq!(catalog.toggle_availability("Educated"), Some(false));
        assert_eq!(catalog.toggle_availability("Educated"), Some(true));
        assert!(catalog.iter().all(Record::is_available));
    }

    #[test]
    fn test_try_add_rejects_duplicate() {
        let mut catalog = sample();
        let result = catalog.try_add(Record::book("Sapiens", "Someone Else", "History"));
        assert!(matches!(result, Err(CatalogError::DuplicateTitle(ref t)) if t == "Sapiens"));
        assert_eq!(catalog.len(), 6);

        catalog.try_add(Record::book("Dune", "Frank Herbert", "Sci-Fi")).unwrap();
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn test_search_title_and_author() {
        let catalog = sample();
        assert_eq!(titles(&catalog.search("yuval")), vec!["Sapiens"]);
        assert_eq!(titles(&catalog.search("SAP")), vec!["Sapiens"]);
        assert_eq!(titles(&catalog.search("ox")), vec!["Oxford Dictionary"]);
        assert_eq!(catalog.search("").len(), catalog.len());
        assert!(catalog.search("zzz").is_empty());
    }

    #[test]
    fn test_search_does_not_trim() {
        let catalog = sample();
        assert!(catalog.search(" sapiens ").is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = sample();
        assert_eq!(titles(&catalog.filter_by_category("History")), vec!["Sapiens"]);
        assert!(catalog.filter_by_category("history").is_empty());
        assert_eq!(catalog.filter_by_category("all").len(), 6);
    }

    #[test]
    fn test_filter_all_sentinel_ignores_real_category_named_all() {
        let mut catalog = Catalog::new();
        catalog.add(Record::book("One", "x", "all"));
        catalog.add(Record::book("Two", "x", "Other"));
        assert_eq!(catalog.filter_by_category("all").len(), 2);
    }

    #[test]
    fn test_categories_first_seen() {
        let mut catalog = Catalog::new();
        catalog.add(Record::book("A", "x", "History"));
        catalog.add(Record::book("B", "x", "Science"));
        catalog.add(Record::book("C", "x", "History"));
        assert_eq!(catalog.categories(), vec!["History", "Science"]);
    }

    #[test]
    fn test_view_two_stage() {
        let catalog = sample();
        let filter = ViewFilter::new("  e ", CategoryFilter::Only("Science".to_string()));
        assert_eq!(titles(&catalog.view(&filter)), vec!["The Selfish Gene"]);
    }

    #[test]
    fn test_to_json() {
        let mut catalog = Catalog::new();
        catalog.add(Record::reference("Oxford Dictionary", "Oxford", "Reference", "REF001"));
        let json: serde_json::Value = serde_json::from_str(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(json[0]["title"], "Oxford Dictionary");
        assert_eq!(json[0]["location_code"], "REF001");
    }

    #[test]
    fn test_independent_catalogs() {
        let mut first = Catalog::new();
        let second = Catalog::new();
        first.add(Record::book("A", "x", "c"));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_mutations_emit_events() {
        let mut catalog = Catalog::new();
        let handle = catalog.subscribe(SubscriptionFilter::all());

        catalog.add(Record::book("Sapiens", "Yuval Noah Harari", "History"));
        catalog.toggle_availability("Sapiens");
        catalog.toggle_availability("Missing");
        catalog.remove("Missing");
        catalog.remove("Sapiens");

        assert_eq!(
            handle.drain(),
            vec![
                CatalogEvent::Added {
                    title: "Sapiens".to_string()
                },
                CatalogEvent::AvailabilityToggled {
                    title: "Sapiens".to_string(),
                    available: false
                },
                CatalogEvent::Removed {
                    title: "Sapiens".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_subscribe_uses_configured_buffer() {
        let mut catalog = Catalog::with_config(CatalogConfig {
            subscription_buffer_size: 1,
        });
        let handle = catalog.subscribe(SubscriptionFilter::all());

        catalog.add(Record::book("A", "x", "c"));
        assert_eq!(catalog.subscription_count(), 1);
        catalog.add(Record::book("B", "x", "c"));
        assert_eq!(catalog.subscription_count(), 0);

        assert_eq!(
            handle.drain(),
            vec![
                CatalogEvent::Added {
                    title: "A".to_string()
                },
                CatalogEvent::Dropped {
                    reason: DropReason::BufferOverflow
                },
            ]
        );
    }
}
