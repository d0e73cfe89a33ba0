//! Suspension primitive for simulated latency and reveal pacing.

use std::time::Duration;

use async_trait::async_trait;

/// Supplies the delays the pipeline waits on.
///
/// Swapped for a recording or gated implementation in tests.
#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Timer backed by the tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
