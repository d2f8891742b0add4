//! Injectable stand-in for network round-trip time.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends a status update for its simulated latency.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real timer via `tokio::time::sleep`. Honours paused test clocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLatency;

#[async_trait]
impl Latency for TokioLatency {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Resolves immediately regardless of the configured delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn pause(&self, _duration: Duration) {}
}
