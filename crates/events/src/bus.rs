//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] is the hub the store publishes [`Notification`]s to.
//! It is designed to be shared via `Arc<NotificationBus>`; whatever renders
//! toasts subscribes to it.

use chrono::{DateTime, Utc};
use propdash_core::notice::Notice;
use propdash_core::types::EntityKind;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A user-facing message about something the store just did.
///
/// Constructed via [`Notification::success`] / [`Notification::error`] and
/// enriched with [`with_description`](Notification::with_description) and
/// [`with_source`](Notification::with_source).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub severity: Severity,

    /// Headline, e.g. `"Invoice marked as paid!"`.
    pub title: String,

    /// Optional second line.
    pub description: Option<String>,

    /// Kind of the record the message is about.
    pub entity_kind: Option<EntityKind>,

    /// Id of the record the message is about.
    pub entity_id: Option<String>,

    /// When the notification was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    fn new(severity: Severity, title: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            description: None,
            entity_kind: None,
            entity_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Severity::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Severity::Error, title)
    }

    /// Build from a domain [`Notice`], keeping its description.
    pub fn from_notice(severity: Severity, notice: Notice) -> Self {
        Self {
            description: notice.description,
            ..Self::new(severity, notice.title)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach the record the message is about.
    pub fn with_source(mut self, kind: EntityKind, id: impl Into<String>) -> Self {
        self.entity_kind = Some(kind);
        self.entity_id = Some(id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out notification bus.
///
/// # Usage
///
/// ```rust
/// use propdash_events::bus::{Notification, NotificationBus};
///
/// let bus = NotificationBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(Notification::success("Invoice marked as paid!"));
/// ```
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no active subscribers the notification is silently dropped.
    pub fn publish(&self, notification: Notification) {
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
