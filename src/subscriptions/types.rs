//! Subscription types for catalog change events.

use serde::{Deserialize, Serialize};

/// Default number of buffered events per subscriber.
pub const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before dropping subscriber.
    /// Default: 1000
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            filter: SubscriptionFilter::default(),
        }
    }
}

/// Which event families a subscriber receives.
#[derive(Clone, Debug)]
pub struct SubscriptionFilter {
    pub include_additions: bool,
    pub include_removals: bool,
    pub include_availability: bool,
}

impl Default for SubscriptionFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl SubscriptionFilter {
    /// Subscribe to everything.
    pub fn all() -> Self {
        Self {
            include_additions: true,
            include_removals: true,
            include_availability: true,
        }
    }

    /// Only additions and removals, i.e. changes to the set of records.
    pub fn membership() -> Self {
        Self {
            include_additions: true,
            include_removals: true,
            include_availability: false,
        }
    }

    /// Only availability flips.
    pub fn availability() -> Self {
        Self {
            include_additions: false,
            include_removals: false,
            include_availability: true,
        }
    }

    pub(crate) fn matches(&self, event: &CatalogEvent) -> bool {
        match event {
            CatalogEvent::Added { .. } => self.include_additions,
            CatalogEvent::Removed { .. } => self.include_removals,
            CatalogEvent::AvailabilityToggled { .. } => self.include_availability,
            CatalogEvent::Dropped { .. } => true,
        }
    }
}

/// Events emitted to subscribers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// A record was appended.
    Added { title: String },

    /// Every record with this title was removed.
    Removed { title: String, count: usize },

    /// The first record with this title changed availability.
    AvailabilityToggled { title: String, available: bool },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Receiver was dropped.
    Disconnected,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<CatalogEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<CatalogEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<CatalogEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything currently buffered, without blocking.
    pub fn drain(&self) -> Vec<CatalogEvent> {
        self.receiver.try_iter().collect()
    }
}
