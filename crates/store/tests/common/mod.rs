//! Shared helpers for store integration tests.

use std::sync::Arc;

use propdash_core::fixtures;
use propdash_events::NotificationBus;
use propdash_store::{NoLatency, Store, StoreConfig, TokioLatency};

/// Store over the built-in seed that resolves every change immediately.
pub fn instant_store() -> Arc<Store> {
    Arc::new(Store::new(
        fixtures::seed().expect("seed should load"),
        StoreConfig::instant(),
        Arc::new(NoLatency),
        Arc::new(NotificationBus::default()),
    ))
}

/// Store over the built-in seed driven by the tokio timer.
///
/// Pair with `#[tokio::test(start_paused = true)]` so delays elapse instantly.
pub fn timed_store(config: StoreConfig) -> Arc<Store> {
    Arc::new(Store::new(
        fixtures::seed().expect("seed should load"),
        config,
        Arc::new(TokioLatency),
        Arc::new(NotificationBus::default()),
    ))
}
