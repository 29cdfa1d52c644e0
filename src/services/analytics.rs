use crate::models::Stats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// How a single webhook call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Fulfilled,
    Rejected,
    Failed,
}

pub struct Analytics {
    fulfilled: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
    start_time: Instant,
}

impl Analytics {
    pub fn new() -> Self {
        Self {
            fulfilled: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Fulfilled => &self.fulfilled,
            Outcome::Rejected => &self.rejected,
            Outcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> Stats {
        Stats {
            fulfilled: self.fulfilled.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            uptime_seconds: self.uptime_seconds(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}
