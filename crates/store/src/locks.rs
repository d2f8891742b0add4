//! Per-record ordering of status updates and in-flight tracking.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use propdash_core::types::EntityKind;
use tokio::sync::oneshot;

type Key = (EntityKind, String);

/// Issue-order queue per record.
///
/// [`enqueue`](Self::enqueue) is synchronous, so a request's place in line is
/// fixed the moment it is issued, before any task is scheduled. Each
/// [`Turn`] waits for the one issued before it on the same key to drop.
/// Keys are only created for ids that exist, so the map is bounded by the
/// record count.
#[derive(Debug, Default)]
pub struct KeyedQueue {
    tails: Mutex<HashMap<Key, oneshot::Receiver<()>>>,
}

impl KeyedQueue {
    pub fn enqueue(&self, kind: EntityKind, id: &str) -> Turn {
        let (done, next) = oneshot::channel();
        let prev = self
            .tails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((kind, id.to_string()), next);
        Turn {
            prev,
            _done: done,
        }
    }
}

/// A place in a [`KeyedQueue`]. The next turn on the same key starts when
/// this one is dropped.
#[derive(Debug)]
pub struct Turn {
    prev: Option<oneshot::Receiver<()>>,
    _done: oneshot::Sender<()>,
}

impl Turn {
    /// Wait until every earlier turn on the same key has finished.
    pub async fn ready(&mut self) {
        if let Some(prev) = self.prev.as_mut() {
            // The sender is never used; completion is signalled by its drop.
            let _ = prev.await;
            self.prev = None;
        }
    }
}

/// Records with a status update queued or running.
///
/// Cheap to clone; clones share the same counts.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    pending: Arc<Mutex<HashMap<Key, usize>>>,
}

impl InFlight {
    /// Mark the record busy until the returned guard drops.
    pub fn begin(&self, kind: EntityKind, id: &str) -> InFlightGuard {
        let key = (kind, id.to_string());
        *self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_insert(0) += 1;
        InFlightGuard {
            owner: self.clone(),
            key,
        }
    }

    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(kind, id.to_string()))
    }

    /// Number of queued or running updates across all records.
    pub fn count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    owner: InFlight,
    key: Key,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut pending = self
            .owner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(n) = pending.get_mut(&self.key) {
            *n -= 1;
            if *n == 0 {
                pending.remove(&self.key);
            }
        }
    }
}
