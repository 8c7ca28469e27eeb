//! In-process delivery of authentication-changed notifications.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::{debug, error};

use jobboard_core::events::{AuthEvent, DomainEvent};

/// Handle returned by [`AuthEventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

/// Synchronous fan-out of [`AuthEvent`]s to subscribed listeners.
///
/// Delivery happens on the publishing task, in subscription order. Events
/// are not buffered: late subscribers miss earlier events.
#[derive(Clone, Default)]
pub struct AuthEventBus {
    listeners: Arc<DashMap<u64, Listener>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for AuthEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl AuthEventBus {
    /// Creates a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every future event.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&DomainEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, Arc::new(listener));
        SubscriptionId(id)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id.0).is_some()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `payload` to every listener and return how many ran to
    /// completion. A panicking listener is logged and skipped.
    pub fn publish(&self, payload: AuthEvent) -> usize {
        let event = DomainEvent::new(payload);

        // Snapshot first so listeners may (un)subscribe without deadlocking the map.
        let mut snapshot: Vec<(u64, Listener)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        snapshot.sort_unstable_by_key(|(id, _)| *id);

        let mut delivered = 0;
        for (id, listener) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| listener(&event))) {
                Ok(()) => delivered += 1,
                Err(_) => {
                    error!(subscription = id, event_id = %event.id, "Auth event listener panicked");
                }
            }
        }

        debug!(
            event_id = %event.id,
            authenticated = event.is_authenticated(),
            delivered,
            "Auth event published"
        );
        delivered
    }
}
