//! Timing and ordering of concurrent status changes.
//!
//! These run on tokio's paused clock, so the simulated latency elapses
//! without real waiting.

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use propdash_core::error::CoreError;
use propdash_core::models::{Application, StatusRecord, WorkOrder};
use propdash_core::status::{ApplicationStatus, WorkOrderStatus};
use propdash_core::types::EntityKind;
use propdash_store::{StoreConfig, UpdatePolicy};
use tokio::time::Instant;

use common::{instant_store, timed_store};

const DELAY: Duration = Duration::from_millis(1200);

fn work_order_delay(policy: UpdatePolicy) -> StoreConfig {
    StoreConfig {
        work_order_delay: DELAY,
        ..StoreConfig::default()
    }
    .with_policy(policy)
}

// ---------------------------------------------------------------------------
// Same record
// ---------------------------------------------------------------------------

/// Two racing changes to one work order never mix fields, and the one issued
/// last is the one that sticks.
#[tokio::test(start_paused = true)]
async fn racing_changes_to_one_record_resolve_in_issue_order() {
    let store = timed_store(work_order_delay(UpdatePolicy::Deferred));
    let original = store.find::<WorkOrder>("WO001").unwrap();

    let (first, second) = tokio::join!(
        store.update_status::<WorkOrder>("WO001", "Complete"),
        store.update_status::<WorkOrder>("WO001", "On Hold"),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.previous, WorkOrderStatus::Pending);
    assert_eq!(second.previous, WorkOrderStatus::Complete);

    let stored = store.find::<WorkOrder>("WO001").unwrap();
    assert_eq!(stored.status, WorkOrderStatus::OnHold);
    assert_eq!(stored, original.with_status(WorkOrderStatus::OnHold));
    assert_eq!(store.snapshot::<WorkOrder>().len(), 7);
}

#[tokio::test(start_paused = true)]
async fn changes_to_one_record_wait_for_each_other() {
    let store = timed_store(work_order_delay(UpdatePolicy::Deferred));
    let start = Instant::now();

    let (a, b) = tokio::join!(
        store.update_status::<WorkOrder>("WO002", "Complete"),
        store.update_status::<WorkOrder>("WO002", "Pending"),
    );
    a.unwrap();
    b.unwrap();

    assert!(start.elapsed() >= DELAY * 2);
}

/// Without latency the same race still ends on the last issued status.
#[tokio::test]
async fn racing_changes_without_latency() {
    let store = instant_store();
    let (a, b) = tokio::join!(
        store.update_status::<WorkOrder>("WO004", "Pending"),
        store.update_status::<WorkOrder>("WO004", "Complete"),
    );
    a.unwrap();
    b.unwrap();
    assert_eq!(
        store.find::<WorkOrder>("WO004").unwrap().status,
        WorkOrderStatus::Complete
    );
}

/// A queued checked change is judged against the status the change ahead of
/// it left behind.
#[tokio::test(start_paused = true)]
async fn queued_checked_change_sees_earlier_decision() {
    let store = timed_store(StoreConfig::default());

    let (approve, deny) = tokio::join!(
        store.update_status_checked::<Application>("APP001", "Approved"),
        store.update_status_checked::<Application>("APP001", "Denied"),
    );

    assert_eq!(approve.unwrap().record.status, ApplicationStatus::Approved);
    assert_matches!(
        deny,
        Err(CoreError::TransitionNotOffered { from, .. }) if from == "Approved"
    );
    assert_eq!(
        store.find::<Application>("APP001").unwrap().status,
        ApplicationStatus::Approved
    );
}

// ---------------------------------------------------------------------------
// Different records
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn changes_to_different_records_overlap() {
    let store = timed_store(work_order_delay(UpdatePolicy::Deferred));
    let start = Instant::now();

    let (a, b) = tokio::join!(
        store.update_status::<WorkOrder>("WO001", "Complete"),
        store.update_status::<WorkOrder>("WO006", "Complete"),
    );
    a.unwrap();
    b.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= DELAY);
    assert!(elapsed < DELAY * 2);

    let orders = store.snapshot::<WorkOrder>();
    assert!(orders
        .iter()
        .filter(|w| w.id == "WO001" || w.id == "WO006")
        .all(|w| w.status == WorkOrderStatus::Complete));
}

// ---------------------------------------------------------------------------
// Visibility during the delay
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn deferred_change_is_invisible_until_resolved() {
    let store = timed_store(StoreConfig::default());

    let task = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .update_status::<Application>("APP001", "Approved")
                .await
        }
    });

    tokio::time::sleep(DELAY / 2).await;
    assert!(store.is_in_flight(EntityKind::Application, "APP001"));
    assert!(!store.is_in_flight(EntityKind::Application, "APP002"));
    assert_eq!(store.in_flight_count(), 1);
    assert_eq!(
        store.find::<Application>("APP001").unwrap().status,
        ApplicationStatus::PendingReview
    );

    task.await.unwrap().unwrap();
    assert!(!store.is_in_flight(EntityKind::Application, "APP001"));
    assert_eq!(
        store.find::<Application>("APP001").unwrap().status,
        ApplicationStatus::Approved
    );
}

#[tokio::test(start_paused = true)]
async fn optimistic_change_is_visible_while_pending() {
    let store = timed_store(StoreConfig::default().with_policy(UpdatePolicy::Optimistic));
    let mut rx = store.bus().subscribe();

    let task = tokio::spawn({
        let store = store.clone();
        async move {
            store
                .update_status::<Application>("APP001", "Approved")
                .await
        }
    });

    tokio::time::sleep(DELAY / 2).await;
    assert!(store.is_in_flight(EntityKind::Application, "APP001"));
    assert_eq!(
        store.find::<Application>("APP001").unwrap().status,
        ApplicationStatus::Approved
    );
    // Not confirmed yet.
    assert!(rx.try_recv().is_err());

    task.await.unwrap().unwrap();
    assert_eq!(rx.recv().await.unwrap().title, "Application approved!");
    assert_eq!(store.in_flight_count(), 0);
}

/// Rejections happen before any latency.
#[tokio::test(start_paused = true)]
async fn invalid_request_fails_without_waiting() {
    let store = timed_store(StoreConfig::default());
    let start = Instant::now();

    assert_matches!(
        store
            .update_status::<Application>("APP001", "Rejected")
            .await,
        Err(CoreError::InvalidTransition { .. })
    );
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// ---------------------------------------------------------------------------
// Abandoned callers
// ---------------------------------------------------------------------------

/// A caller that stops waiting does not stop the change it started.
#[tokio::test(start_paused = true)]
async fn deferred_change_completes_after_caller_gives_up() {
    let store = timed_store(StoreConfig::default());
    let mut rx = store.bus().subscribe();

    let gave_up = tokio::time::timeout(
        DELAY / 2,
        store.update_status::<Application>("APP001", "Approved"),
    )
    .await;
    assert!(gave_up.is_err());
    assert!(store.is_in_flight(EntityKind::Application, "APP001"));

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(
        store.find::<Application>("APP001").unwrap().status,
        ApplicationStatus::Approved
    );
    let toast = rx.try_recv().expect("completion should be announced");
    assert_eq!(toast.title, "Application approved!");
    assert_eq!(store.in_flight_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn optimistic_change_is_confirmed_after_caller_gives_up() {
    let store = timed_store(StoreConfig::default().with_policy(UpdatePolicy::Optimistic));
    let mut rx = store.bus().subscribe();

    let gave_up = tokio::time::timeout(
        DELAY / 2,
        store.update_status::<Application>("APP002", "Denied"),
    )
    .await;
    assert!(gave_up.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(
        store.find::<Application>("APP002").unwrap().status,
        ApplicationStatus::Denied
    );
    assert_eq!(rx.try_recv().unwrap().title, "Application denied!");
    assert!(!store.is_in_flight(EntityKind::Application, "APP002"));
}

/// An abandoned change still holds its place in line for the record.
#[tokio::test(start_paused = true)]
async fn abandoned_change_keeps_its_place_in_line() {
    let store = timed_store(work_order_delay(UpdatePolicy::Deferred));

    let _ = tokio::time::timeout(
        Duration::from_millis(1),
        store.update_status::<WorkOrder>("WO001", "Complete"),
    )
    .await;
    let last = store
        .update_status::<WorkOrder>("WO001", "On Hold")
        .await
        .unwrap();

    assert_eq!(last.previous, WorkOrderStatus::Complete);
    assert_eq!(
        store.find::<WorkOrder>("WO001").unwrap().status,
        WorkOrderStatus::OnHold
    );
}
