//! Domain events emitted by the session layer.
//!
//! Events are delivered synchronously to in-process listeners (navigation,
//! UI state). Nothing is queued or persisted; a listener that is not
//! subscribed when an event fires never sees it.

pub mod auth;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use auth::AuthEvent;

/// Wrapper for domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: AuthEvent,
}

impl DomainEvent {
    /// Create a new domain event stamped with the current time.
    pub fn new(payload: AuthEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// Whether the user is authenticated after this event.
    pub fn is_authenticated(&self) -> bool {
        self.payload.is_authenticated()
    }
}
