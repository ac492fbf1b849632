//! Core types for the catalog.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pseudo-category meaning "no category filtering".
pub const ALL_CATEGORIES: &str = "all";

/// What kind of catalog entry a record is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordKind {
    /// A circulating book.
    Book,

    /// Non-circulating reference material shelved at a physical location.
    Reference { location_code: String },
}

/// A single catalog entry.
///
/// Every field is fixed at construction except availability, which only
/// [`Record::toggle_availability`] changes. The title is the lookup key
/// used by [`Catalog`](crate::Catalog) for removal and toggling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    title: String,
    author: String,
    category: String,
    available: bool,
    #[serde(flatten)]
    kind: RecordKind,
}

impl Record {
    /// Build a record of either kind. `Some` location code makes a reference record.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        available: bool,
        location_code: Option<String>,
    ) -> Self {
        let kind = match location_code {
            Some(location_code) => RecordKind::Reference { location_code },
            None => RecordKind::Book,
        };

        Self {
            title: title.into(),
            author: author.into(),
            category: category.into(),
            available,
            kind,
        }
    }

    /// A plain, available book.
    pub fn book(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self::new(title, author, category, true, None)
    }

    /// An available reference record with a location code.
    pub fn reference(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
        location_code: impl Into<String>,
    ) -> Self {
        Self::new(title, author, category, true, Some(location_code.into()))
    }

    /// Set the initial availability.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Title, used as the lookup key within a catalog.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author as entered.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Free-form category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether the record can currently be borrowed.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Plain book or reference record.
    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    /// True for reference records.
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, RecordKind::Reference { .. })
    }

    /// Shelf location, present only for reference records.
    pub fn location_code(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::Reference { location_code } => Some(location_code),
            RecordKind::Book => None,
        }
    }

    /// Flip availability in place, returning the new state.
    pub fn toggle_availability(&mut self) -> bool {
        self.available = !self.available;
        self.available
    }

    /// Human-readable summary of every field, including the location for
    /// reference records.
    pub fn description(&self) -> String {
        let mut text = format!(
            "Title: {}, Author: {}, Category: {}, Available: {}",
            self.title, self.author, self.category, self.available
        );
        if let RecordKind::Reference { location_code } = &self.kind {
            text.push_str(", Location: ");
            text.push_str(location_code);
        }
        text
    }

    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Raw form input for a new record, before presence checks.
#[derive(Clone, Debug, Default)]
pub struct RecordInput {
    pub title: String,
    pub author: String,
    pub category: String,
    /// Empty for plain books.
    pub location_code: String,
}

impl RecordInput {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            category: category.into(),
            location_code: String::new(),
        }
    }

    /// Add a location code, making the result a reference record.
    pub fn with_location_code(mut self, location_code: impl Into<String>) -> Self {
        self.location_code = location_code.into();
        self
    }

    /// Trim every field and build an available record.
    ///
    /// Title, author and category must be non-empty after trimming. A
    /// non-empty location code selects [`RecordKind::Reference`].
    pub fn into_record(self) -> Result<Record> {
        let title = required("title", &self.title)?;
        let author = required("author", &self.author)?;
        let category = required("category", &self.category)?;

        let location = self.location_code.trim();
        let location_code = (!location.is_empty()).then(|| location.to_string());

        Ok(Record::new(title, author, category, true, location_code))
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CatalogError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Category selection for a view.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,

    /// Exact, case-sensitive category match.
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}
