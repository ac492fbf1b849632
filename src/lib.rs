//! # Shelfmark
//!
//! An in-memory book catalog: an ordered collection of records with
//! substring search, category filtering and availability toggling, plus
//! change notifications for whatever renders it.
//!
//! ## Core Concepts
//!
//! - **Records**: Books, or reference books that carry a shelf location code
//! - **Catalog**: Insertion-ordered collection keyed by title
//! - **Views**: Search narrowed by category, the way a list page shows it
//! - **Subscriptions**: Bounded event channels fired on every mutation
//!
//! ## Example
//!
//! ```ignore
//! use shelfmark::{Catalog, Record, ViewFilter};
//!
//! let mut catalog = Catalog::new();
//! catalog.add(Record::book("Sapiens", "Yuval Noah Harari", "History"));
//! catalog.add(Record::reference("Oxford Dictionary", "Oxford", "Reference", "REF001"));
//!
//! let hits = catalog.view(&ViewFilter::new("yuval", "History"));
//! assert_eq!(hits[0].title(), "Sapiens");
//!
//! catalog.toggle_availability("Sapiens");
//! println!("{}", catalog.categories().join(", "));
//! ```

pub mod catalog;
pub mod error;
pub mod subscriptions;
pub mod types;
pub mod view;

// Re-exports
pub use catalog::{Catalog, CatalogConfig};
pub use error::{CatalogError, Result};
pub use subscriptions::{
    CatalogEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
pub use view::ViewFilter;
