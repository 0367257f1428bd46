//! Wall clock and sleeping, behind a trait so tests can run many cycles instantly

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

#[async_trait]
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time in unix seconds
    fn now(&self) -> i64;

    /// Wait for `duration`
    async fn sleep(&self, duration: Duration);
}

/// The real clock, backed by the system time and tokio timers
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
