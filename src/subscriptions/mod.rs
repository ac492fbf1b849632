//! Change notifications for catalog mutations.
//!
//! A renderer subscribes once and redraws whenever an event arrives,
//! instead of polling the catalog after every user action:
//! - Record additions
//! - Record removals
//! - Availability changes
//!
//! Buffers are bounded. A subscriber that falls behind is dropped.
//!
//! # Example
//!
//! ```ignore
//! let mut catalog = Catalog::new();
//! let handle = catalog.subscribe(SubscriptionConfig::default());
//!
//! catalog.add(Record::book("Sapiens", "Yuval Noah Harari", "History"));
//!
//! while let Ok(event) = handle.try_recv() {
//!     match event {
//!         CatalogEvent::Added { title } => println!("added {title}"),
//!         CatalogEvent::Dropped { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    CatalogEvent, DropReason, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, DEFAULT_BUFFER_SIZE,
};
