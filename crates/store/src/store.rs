//! The entity store: snapshot reads plus asynchronous status changes.

use std::sync::Arc;

use propdash_core::error::CoreError;
use propdash_core::filter::{self, Criteria};
use propdash_core::models::{find_by_id, Dataset, StatusRecord};
use propdash_core::notice::{Announce, Notice};
use propdash_core::status::Labeled;
use propdash_core::transitions::{check_offered, parse_status, Transitions};
use propdash_core::types::EntityKind;
use propdash_events::{Notification, NotificationBus, Severity};

use crate::config::{StoreConfig, UpdatePolicy};
use crate::latency::Latency;
use crate::locks::{InFlight, InFlightGuard, KeyedQueue, Turn};
use crate::tables::{Stored, Tables};

/// Extra validation run on `(current, requested)` before a change applies.
type Check<S> = fn(S, S) -> Result<(), CoreError>;

/// Result of a completed status change.
#[derive(Debug, Clone)]
pub struct StatusChange<E: StatusRecord> {
    /// Status the record had when the change applied.
    pub previous: E::Status,
    /// The record as stored after the change.
    pub record: E,
}

/// In-memory store for every dashboard collection.
///
/// Reads return immutable snapshots. Status changes are validated
/// synchronously, then wait out a simulated latency and replace the affected
/// collection wholesale. Changes to the same record apply in issue order;
/// changes to different records run independently.
///
/// Once accepted, a change runs on its own task: dropping the future
/// returned by [`update_status`](Self::update_status) does not cancel it.
/// Status changes therefore need a tokio runtime.
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    tables: Tables,
    config: StoreConfig,
    latency: Arc<dyn Latency>,
    bus: Arc<NotificationBus>,
    queue: KeyedQueue,
    in_flight: InFlight,
}

impl Store {
    pub fn new(
        dataset: Dataset,
        config: StoreConfig,
        latency: Arc<dyn Latency>,
        bus: Arc<NotificationBus>,
    ) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                tables: Tables::new(dataset),
                config,
                latency,
                bus,
                queue: KeyedQueue::default(),
                in_flight: InFlight::default(),
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn bus(&self) -> &Arc<NotificationBus> {
        &self.inner.bus
    }

    // -- reads --------------------------------------------------------------

    /// Current contents of one collection.
    pub fn snapshot<T: Stored>(&self) -> Arc<Vec<T>> {
        self.inner.snapshot()
    }

    /// Owned copy of every collection.
    pub fn dataset(&self) -> Dataset {
        self.inner.tables.dataset()
    }

    pub fn find<T: Stored>(&self, id: &str) -> Option<T> {
        find_by_id(&self.snapshot::<T>(), id).cloned()
    }

    /// Records of one collection matching `criteria`, in insertion order.
    pub fn filtered<C>(&self, criteria: &C) -> Vec<C::Record>
    where
        C: Criteria,
        C::Record: Stored,
    {
        let records = self.snapshot::<C::Record>();
        filter::filter(records.iter(), criteria)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Whether a status change for the record is queued or running.
    pub fn is_in_flight(&self, kind: EntityKind, id: &str) -> bool {
        self.inner.in_flight.contains(kind, id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.inner.in_flight.count()
    }

    // -- status changes -----------------------------------------------------

    /// Change the status of record `id` to the label `raw`.
    ///
    /// Any member of the entity's status enumeration is accepted, from any
    /// current status. Unknown labels fail with
    /// [`CoreError::InvalidTransition`], unknown ids with
    /// [`CoreError::NotFound`]; both fail before any latency and leave the
    /// store untouched.
    pub async fn update_status<E>(&self, id: &str, raw: &str) -> Result<StatusChange<E>, CoreError>
    where
        E: Stored + StatusRecord + Announce,
    {
        self.run_update::<E>(id, raw, |_, _| Ok(())).await
    }

    /// Like [`update_status`](Self::update_status), but also rejects moves
    /// the dashboard does not offer from the record's current status.
    ///
    /// The check runs when the request is issued and again when it applies,
    /// so a change queued behind another one is judged against the status
    /// that one left behind.
    pub async fn update_status_checked<E>(
        &self,
        id: &str,
        raw: &str,
    ) -> Result<StatusChange<E>, CoreError>
    where
        E: Stored + StatusRecord + Announce,
        E::Status: Transitions,
    {
        self.run_update::<E>(id, raw, check_offered::<E>).await
    }

    async fn run_update<E>(
        &self,
        id: &str,
        raw: &str,
        check: Check<E::Status>,
    ) -> Result<StatusChange<E>, CoreError>
    where
        E: Stored + StatusRecord + Announce,
    {
        let requested = match self.inner.validate::<E>(id, raw, check) {
            Ok(status) => status,
            Err(e) => return Err(self.inner.reject::<E>(id, e)),
        };

        // Everything below runs to completion even if the caller goes away.
        // The queue position and in-flight mark are taken before spawning so
        // issue order and visibility do not depend on task scheduling.
        let busy = self.inner.in_flight.begin(E::KIND, id);
        let turn = self.inner.queue.enqueue(E::KIND, id);
        let inner = Arc::clone(&self.inner);
        let owned_id = id.to_string();
        let task = tokio::spawn(async move {
            inner
                .apply_in_turn::<E>(&owned_id, requested, check, turn, busy)
                .await
        });

        match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                tracing::error!(kind = %E::KIND, id, error = %e, "Status change task aborted");
                Err(CoreError::Interrupted {
                    entity: E::KIND,
                    id: id.to_string(),
                })
            }
        }
    }
}

impl StoreInner {
    fn snapshot<T: Stored>(&self) -> Arc<Vec<T>> {
        T::slot(&self.tables).load()
    }

    /// Checks run before the request is queued.
    fn validate<E>(&self, id: &str, raw: &str, check: Check<E::Status>) -> Result<E::Status, CoreError>
    where
        E: Stored + StatusRecord,
    {
        let requested = parse_status::<E>(raw)?;
        let records = self.snapshot::<E>();
        let current = find_by_id(&records, id).ok_or_else(|| CoreError::NotFound {
            entity: E::KIND,
            id: id.to_string(),
        })?;
        check(current.status(), requested)?;
        Ok(requested)
    }

    /// Wait for earlier changes to the record, then run the latency and
    /// swap according to the update policy and announce the outcome.
    async fn apply_in_turn<E>(
        &self,
        id: &str,
        requested: E::Status,
        check: Check<E::Status>,
        mut turn: Turn,
        _busy: InFlightGuard,
    ) -> Result<StatusChange<E>, CoreError>
    where
        E: Stored + StatusRecord + Announce,
    {
        turn.ready().await;

        let delay = self.config.delay_for(E::KIND);
        tracing::debug!(
            kind = %E::KIND,
            id,
            status = requested.label(),
            delay_ms = delay.as_millis() as u64,
            policy = ?self.config.policy,
            "Applying status change"
        );

        let applied = match self.config.policy {
            UpdatePolicy::Deferred => {
                self.latency.pause(delay).await;
                self.apply::<E>(id, requested, check)
            }
            UpdatePolicy::Optimistic => {
                let applied = self.apply::<E>(id, requested, check);
                if applied.is_ok() {
                    self.latency.pause(delay).await;
                }
                applied
            }
        };

        let change = applied.map_err(|e| self.reject::<E>(id, e))?;

        tracing::info!(
            kind = %E::KIND,
            id,
            from = change.previous.label(),
            to = requested.label(),
            "Status updated"
        );
        self.bus.publish(
            Notification::from_notice(Severity::Success, change.record.status_notice())
                .with_source(E::KIND, id),
        );
        Ok(change)
    }

    /// Swap in a collection with record `id` moved to `status`.
    fn apply<E>(
        &self,
        id: &str,
        status: E::Status,
        check: Check<E::Status>,
    ) -> Result<StatusChange<E>, CoreError>
    where
        E: Stored + StatusRecord,
    {
        E::slot(&self.tables).replace_with(|current| -> Result<_, CoreError> {
            let index = current
                .iter()
                .position(|r| r.id() == id)
                .ok_or_else(|| CoreError::NotFound {
                    entity: E::KIND,
                    id: id.to_string(),
                })?;
            let previous = current[index].status();
            check(previous, status)?;

            let record = current[index].with_status(status);
            let mut next = current.to_vec();
            next[index] = record.clone();
            Ok((next, StatusChange { previous, record }))
        })
    }

    /// Log and announce a rejected request, handing the error back.
    fn reject<E: StatusRecord>(&self, id: &str, error: CoreError) -> CoreError {
        tracing::warn!(kind = %E::KIND, id, error = %error, "Status change rejected");
        self.bus.publish(
            Notification::from_notice(Severity::Error, Notice::failure(&error))
                .with_source(E::KIND, id),
        );
        error
    }
}
