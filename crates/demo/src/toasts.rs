//! Logs every notification the store publishes, standing in for on-screen
//! toasts.

use std::sync::Arc;

use propdash_events::{Notification, NotificationBus};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Spawn a task that logs notifications until the bus is dropped.
///
/// Returns the number of notifications seen when the task ends.
pub fn spawn_logger(bus: &Arc<NotificationBus>) -> JoinHandle<usize> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        let mut seen = 0;
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    seen += 1;
                    log(&notification);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification logger fell behind");
                }
                Err(RecvError::Closed) => {
                    tracing::debug!(seen, "Notification bus closed, logger shutting down");
                    break;
                }
            }
        }
        seen
    })
}

fn log(n: &Notification) {
    let kind = n.entity_kind.map(|k| k.name()).unwrap_or("-");
    let id = n.entity_id.as_deref().unwrap_or("-");
    let description = n.description.as_deref().unwrap_or("");
    if n.is_error() {
        tracing::warn!(kind, id, description, "{}", n.title);
    } else {
        tracing::info!(kind, id, description, "{}", n.title);
    }
}
