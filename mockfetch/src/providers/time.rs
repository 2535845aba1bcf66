//! Time provider abstraction for simulated latency.
//!
//! Fetch operations never call tokio directly. They suspend through a
//! [`TimeProvider`] so the same code runs against the wall clock or against
//! tokio's paused test clock.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Provider trait for time operations.
///
/// `sleep` must only suspend the calling task; other tasks scheduled on the
/// same runtime keep making progress while it is pending.
#[async_trait(?Send)]
pub trait TimeProvider: Clone {
    /// Suspend the calling task for the specified duration.
    async fn sleep(&self, duration: Duration);

    /// Elapsed time since the provider was created.
    ///
    /// Monotonic. Use differences between two readings to measure how long
    /// an orchestration took.
    fn now(&self) -> Duration;
}

/// Time provider backed by tokio's timer.
///
/// Uses [`tokio::time::Instant`] so that tests running with a paused clock
/// observe exact simulated durations.
#[derive(Debug, Clone)]
pub struct TokioTimeProvider {
    start_time: Instant,
}

impl TokioTimeProvider {
    /// Create a new Tokio time provider.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for TokioTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl TimeProvider for TokioTimeProvider {
    async fn sleep(&self, duration: Duration) {
        if duration.is_zero() {
            // Still yield so a zero-latency fetch remains a suspension point
            tokio::task::yield_now().await;
            return;
        }
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Duration {
        self.start_time.elapsed()
    }
}
