//! Subscription manager for broadcasting catalog events.

use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use super::types::{CatalogEvent, DropReason, SubscriptionConfig, SubscriptionHandle, SubscriptionId};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    /// Events the subscriber may have pending. The channel holds one more
    /// slot so the final `Dropped` notice always fits.
    capacity: usize,
    sender: Sender<CatalogEvent>,
}

impl Subscription {
    /// Try to send an event. On failure, returns why the subscriber must go.
    fn try_send(&self, event: CatalogEvent) -> Option<DropReason> {
        if self.sender.len() >= self.capacity {
            return Some(DropReason::BufferOverflow);
        }
        match self.sender.try_send(event) {
            Ok(()) => None,
            Err(TrySendError::Full(_)) => Some(DropReason::BufferOverflow),
            Err(TrySendError::Disconnected(_)) => Some(DropReason::Disconnected),
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        // A zero-capacity channel is a rendezvous channel and would drop
        // every subscriber on the first event.
        let capacity = config.buffer_size.max(1);
        let (sender, receiver) = bounded(capacity + 1);

        self.subscriptions.write().insert(
            id,
            Subscription {
                config,
                capacity,
                sender,
            },
        );
        debug!(subscription = id.0, "Subscribed to catalog events");

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subs = self.subscriptions.write();
        if let Some(sub) = subs.remove(&id) {
            // Best effort
            let _ = sub.sender.try_send(CatalogEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
            debug!(subscription = id.0, "Unsubscribed from catalog events");
        }
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Deliver an event to every subscriber whose filter accepts it.
    /// Drops subscribers that fail to receive.
    pub fn broadcast(&self, event: CatalogEvent) {
        let mut to_remove = Vec::new();

        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if !sub.config.filter.matches(&event) {
                    continue;
                }
                if let Some(reason) = sub.try_send(event.clone()) {
                    to_remove.push((*id, reason));
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscriptions.write();
            for (id, reason) in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    debug!(subscription = id.0, ?reason, "Dropping subscriber");
                    // Fails only when the receiver is already gone
                    let _ = sub.sender.try_send(CatalogEvent::Dropped { reason });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriptionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionManager")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}
