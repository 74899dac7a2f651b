//! Pacing between successive dispatches.
//!
//! Bulk flows pause between individual submissions so a control service is
//! not flooded. The pause is a seam, not a hardcoded sleep: production
//! wiring injects an interval, tests inject [`NoPacer`] and run without
//! wall-clock delay.

use async_trait::async_trait;
use std::time::Duration;

/// Pause applied between successive dispatches of one flow.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed-interval pacing.
pub struct IntervalPacer {
    delay: Duration,
}

impl IntervalPacer {
    pub fn new(delay: Duration) -> Self {
        IntervalPacer { delay }
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No pacing.
pub struct NoPacer;

#[async_trait]
impl Pacer for NoPacer {
    async fn pause(&self) {}
}
